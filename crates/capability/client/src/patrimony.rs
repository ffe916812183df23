//! 资产资源客户端。

use crate::error::ClientError;
use crate::executor::ApiExecutor;
use crate::transport::{ApiRequest, FileUpload, RawResponse};
use api_contract::{
    AssetPayload, ContractError, CreatedAsset, PATRIMONY_PATH, UploadedFile, WireAsset,
    patrimony_document_path, patrimony_image_path, patrimony_item_path,
};
use domain::{AssetDraft, AssetFields, AssetFilter, AssetRecord, DocumentKind, ValidationError};
use patrimony_telemetry::{record_skipped_record, record_validation_rejection};
use std::sync::Arc;
use tracing::{info, warn};

/// 图片上传字段名。
const IMAGE_FIELD: &str = "image";
/// 文档上传字段名。
const DOCUMENT_FIELD: &str = "document";

#[derive(Clone)]
pub struct PatrimonyClient {
    executor: Arc<ApiExecutor>,
}

impl PatrimonyClient {
    pub fn new(executor: Arc<ApiExecutor>) -> Self {
        Self { executor }
    }

    /// 按条件列出资产；未设置的条件不出现在查询参数中。
    pub async fn list(&self, filter: &AssetFilter) -> Result<Vec<AssetRecord>, ClientError> {
        let request = ApiRequest::get(PATRIMONY_PATH)
            .query("department", filter.department.as_ref().map(|dept| dept.as_str()))
            .query("status", filter.status.as_ref().map(|status| status.as_str()));
        let response = self.executor.execute(request).await?;
        let decoded = WireAsset::decode_list(&response.body, self.executor.upload_base())
            .map_err(|err| ClientError::invalid_body(response.status.as_u16(), &err))?;
        for skipped in &decoded.skipped {
            record_skipped_record();
            warn!(
                id = skipped.id.as_deref().unwrap_or("-"),
                error = %skipped.error,
                "patrimony row skipped"
            );
        }
        Ok(decoded.records)
    }

    pub async fn get(&self, id: &str) -> Result<AssetRecord, ClientError> {
        let response = self
            .executor
            .execute(ApiRequest::get(patrimony_item_path(id)))
            .await?;
        WireAsset::decode_one(&response.body, self.executor.upload_base())
            .map_err(|err| ClientError::invalid_body(response.status.as_u16(), &err))
    }

    /// 提交前检查车牌/编号是否已被占用。
    pub async fn plate_exists(&self, plate: &str) -> Result<bool, ClientError> {
        let plate = plate.trim();
        if plate.is_empty() {
            record_validation_rejection();
            return Err(ValidationError::new("plate", "required").into());
        }
        let response = self
            .executor
            .execute(ApiRequest::get(PATRIMONY_PATH).query("plate", Some(plate)))
            .await?;
        // 比对原始行：部门无法识别的记录同样占用编号。
        let rows: Vec<WireAsset> = decode(&response)?;
        Ok(rows
            .iter()
            .any(|row| row.plate.trim().eq_ignore_ascii_case(plate)))
    }

    /// 创建资产，返回服务端分配的 id。
    pub async fn create(&self, fields: &AssetFields) -> Result<String, ClientError> {
        let draft = validate(fields)?;
        let response = self
            .executor
            .execute(ApiRequest::post(PATRIMONY_PATH).json(payload(&draft)?))
            .await?;
        let created: CreatedAsset = decode(&response)?;
        let id = created.id.ok_or_else(|| {
            ClientError::invalid_body(
                response.status.as_u16(),
                &ContractError::MissingField("id"),
            )
        })?;
        info!(id = %id, plate = %draft.plate, "patrimony created");
        Ok(id)
    }

    /// 全量更新。
    pub async fn update(&self, id: &str, fields: &AssetFields) -> Result<(), ClientError> {
        let draft = validate(fields)?;
        self.executor
            .execute(ApiRequest::put(patrimony_item_path(id)).json(payload(&draft)?))
            .await?;
        info!(id, "patrimony updated");
        Ok(())
    }

    /// 删除；确认步骤由界面层负责。
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.executor
            .execute(ApiRequest::delete(patrimony_item_path(id)))
            .await?;
        info!(id, "patrimony deleted");
        Ok(())
    }

    /// 上传图片，返回规范化后的图片地址。
    pub async fn upload_image(
        &self,
        id: &str,
        file: FileUpload,
    ) -> Result<Option<String>, ClientError> {
        let request = ApiRequest::post(patrimony_image_path(id)).multipart(IMAGE_FIELD, file);
        let response = self.executor.execute(request).await?;
        let uploaded: UploadedFile = decode(&response)?;
        Ok(uploaded.stored_reference(self.executor.upload_base()))
    }

    /// 上传发票/承诺单/DENF-SE 文档。
    pub async fn upload_document(
        &self,
        id: &str,
        kind: DocumentKind,
        file: FileUpload,
    ) -> Result<Option<String>, ClientError> {
        let request =
            ApiRequest::post(patrimony_document_path(id, kind)).multipart(DOCUMENT_FIELD, file);
        let response = self.executor.execute(request).await?;
        let uploaded: UploadedFile = decode(&response)?;
        Ok(uploaded.stored_reference(self.executor.upload_base()))
    }
}

fn validate(fields: &AssetFields) -> Result<AssetDraft, ClientError> {
    fields.validate().map_err(|err| {
        record_validation_rejection();
        ClientError::Validation(err)
    })
}

fn payload(draft: &AssetDraft) -> Result<serde_json::Value, ClientError> {
    encode(&AssetPayload::from(draft))
}

/// 请求体序列化。
pub(crate) fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(value)
        .map_err(|err| ClientError::Validation(ValidationError::new("body", err.to_string())))
}

/// 解析 JSON 响应体；空响应体按 `{}` 处理。
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    response: &RawResponse,
) -> Result<T, ClientError> {
    let body = if response.body.trim().is_empty() {
        "{}"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body)
        .map_err(|err| ClientError::invalid_body(response.status.as_u16(), &err.into()))
}
