//! 资产 DTO 与映射。

use crate::error::ContractError;
use crate::image::normalize_image_url;
use crate::lenient::{self, non_empty};
use chrono::{DateTime, NaiveDate, Utc};
use domain::{AssetDraft, AssetRecord, AssetStatus, Department, DocumentRef};
use serde::{Deserialize, Serialize};

/// 列表解析结果。
#[derive(Debug, Default)]
pub struct DecodedAssets {
    pub records: Vec<AssetRecord>,
    pub skipped: Vec<SkippedAsset>,
}

/// 无法映射为领域记录的条目。
#[derive(Debug)]
pub struct SkippedAsset {
    pub id: Option<String>,
    pub error: ContractError,
}

/// 后端返回的资产结构（下划线字段）。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireAsset {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub plate: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub acquisition_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub value: Option<f64>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub commitment_number: Option<String>,
    #[serde(default)]
    pub denf_se_number: Option<String>,
    #[serde(default)]
    pub invoice_file: Option<String>,
    #[serde(default)]
    pub commitment_file: Option<String>,
    #[serde(default)]
    pub denf_se_file: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl WireAsset {
    /// 线上结构 → 领域记录。
    ///
    /// 可选字段缺失或无法解析时为 None，金额缺失时为 0。
    pub fn into_record(self, upload_base: &str) -> Result<AssetRecord, ContractError> {
        let id = self.id.ok_or(ContractError::MissingField("id"))?;
        let department = Department::parse(&self.department)
            .ok_or_else(|| ContractError::UnknownDepartment(self.department.clone()))?;
        let status = match non_empty(self.status) {
            None => AssetStatus::default(),
            Some(status) => {
                AssetStatus::parse(&status).ok_or(ContractError::UnknownStatus(status))?
            }
        };
        let image_url = normalize_image_url(self.image_url.as_deref(), upload_base);
        let invoice_file = normalize_image_url(self.invoice_file.as_deref(), upload_base);
        let commitment_file = normalize_image_url(self.commitment_file.as_deref(), upload_base);
        let denf_se_file = normalize_image_url(self.denf_se_file.as_deref(), upload_base);

        Ok(AssetRecord {
            id,
            plate: self.plate,
            name: self.name,
            description: non_empty(self.description),
            acquisition_date: self.acquisition_date.as_deref().and_then(parse_date),
            value: self.value.unwrap_or(0.0),
            department,
            status,
            image_url,
            invoice: DocumentRef {
                number: non_empty(self.invoice_number),
                file: invoice_file,
            },
            commitment: DocumentRef {
                number: non_empty(self.commitment_number),
                file: commitment_file,
            },
            denf_se: DocumentRef {
                number: non_empty(self.denf_se_number),
                file: denf_se_file,
            },
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
        })
    }

    /// 解析资产数组响应体。
    ///
    /// 单条记录映射失败时跳过并放入 `skipped`，其余记录照常返回；
    /// 只有响应体本身不是数组时才整体失败。
    pub fn decode_list(body: &str, upload_base: &str) -> Result<DecodedAssets, ContractError> {
        let items: Vec<WireAsset> = serde_json::from_str(body)?;
        let mut decoded = DecodedAssets::default();
        for item in items {
            let id = item.id.clone();
            match item.into_record(upload_base) {
                Ok(record) => decoded.records.push(record),
                Err(error) => decoded.skipped.push(SkippedAsset { id, error }),
            }
        }
        Ok(decoded)
    }

    /// 解析单个资产响应体。
    pub fn decode_one(body: &str, upload_base: &str) -> Result<AssetRecord, ContractError> {
        let item: WireAsset = serde_json::from_str(body)?;
        item.into_record(upload_base)
    }
}

/// 创建/更新请求体（不含 id 与审计字段）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPayload {
    pub plate: String,
    pub name: String,
    pub description: String,
    pub acquisition_date: Option<String>,
    pub value: f64,
    pub department: String,
    pub status: String,
    pub invoice_number: Option<String>,
    pub commitment_number: Option<String>,
    pub denf_se_number: Option<String>,
}

impl From<&AssetDraft> for AssetPayload {
    fn from(draft: &AssetDraft) -> Self {
        Self {
            plate: draft.plate.clone(),
            name: draft.name.clone(),
            description: draft.description.clone().unwrap_or_default(),
            acquisition_date: draft
                .acquisition_date
                .map(|date| date.format("%Y-%m-%d").to_string()),
            value: draft.value,
            department: draft.department.as_str().to_string(),
            status: draft.status.as_str().to_string(),
            invoice_number: draft.invoice_number.clone(),
            commitment_number: draft.commitment_number.clone(),
            denf_se_number: draft.denf_se_number.clone(),
        }
    }
}

/// 创建响应：仅读取服务端分配的 id。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedAsset {
    #[serde(default, deserialize_with = "lenient::opt_id")]
    pub id: Option<String>,
}

/// 上传响应：图片或文档的存储引用。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

impl UploadedFile {
    pub fn stored_reference(&self, upload_base: &str) -> Option<String> {
        let raw = self.image_url.as_deref().or(self.document_url.as_deref());
        normalize_image_url(raw, upload_base)
    }
}

/// 日期字段：接受 `YYYY-MM-DD` 或带时间的前缀。
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let prefix = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|value| value.with_timezone(&Utc))
}
