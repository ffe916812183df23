//! 资产（patrimony item）领域模型与表单校验。

use crate::validation::{ValidationError, optional, require};
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// 部门（固定枚举）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Education,
    Health,
    Administration,
    Urbanism,
    Culture,
    Sports,
    Transportation,
    Finance,
    Tourism,
    Environment,
}

impl Department {
    pub const ALL: [Department; 10] = [
        Department::Education,
        Department::Health,
        Department::Administration,
        Department::Urbanism,
        Department::Culture,
        Department::Sports,
        Department::Transportation,
        Department::Finance,
        Department::Tourism,
        Department::Environment,
    ];

    /// 线上取值。
    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Education => "education",
            Department::Health => "health",
            Department::Administration => "administration",
            Department::Urbanism => "urbanism",
            Department::Culture => "culture",
            Department::Sports => "sports",
            Department::Transportation => "transportation",
            Department::Finance => "finance",
            Department::Tourism => "tourism",
            Department::Environment => "environment",
        }
    }

    /// 界面显示名称。
    pub fn label(&self) -> &'static str {
        match self {
            Department::Education => "Educação",
            Department::Health => "Saúde",
            Department::Administration => "Administração",
            Department::Urbanism => "Urbanismo",
            Department::Culture => "Cultura",
            Department::Sports => "Esportes",
            Department::Transportation => "Transporte",
            Department::Finance => "Finanças",
            Department::Tourism => "Turismo",
            Department::Environment => "Meio Ambiente",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|dept| dept.as_str() == value)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 资产状态（封闭枚举，默认 active）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
    /// 报废（软退役，不是删除）。
    WrittenOff,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 4] = [
        AssetStatus::Active,
        AssetStatus::Inactive,
        AssetStatus::Maintenance,
        AssetStatus::WrittenOff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Inactive => "inactive",
            AssetStatus::Maintenance => "maintenance",
            AssetStatus::WrittenOff => "written_off",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetStatus::Active => "Ativo",
            AssetStatus::Inactive => "Inativo",
            AssetStatus::Maintenance => "Manutenção",
            AssetStatus::WrittenOff => "Baixado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 附件文档类型：发票、承诺单、DENF/SE。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Invoice,
    Commitment,
    DenfSe,
}

impl DocumentKind {
    /// 上传接口路径中的类型段。
    pub fn path_segment(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "invoice",
            DocumentKind::Commitment => "commitment",
            DocumentKind::DenfSe => "denf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Nota Fiscal",
            DocumentKind::Commitment => "Empenho",
            DocumentKind::DenfSe => "DENF/SE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "invoice" => Some(DocumentKind::Invoice),
            "commitment" => Some(DocumentKind::Commitment),
            "denf" | "denf_se" => Some(DocumentKind::DenfSe),
            _ => None,
        }
    }
}

/// 文档引用：显示编号 + 已上传文件。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentRef {
    pub number: Option<String>,
    pub file: Option<String>,
}

/// 资产记录。
///
/// `id` 与审计时间戳由服务端分配，客户端只读。
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub id: String,
    pub plate: String,
    pub name: String,
    pub description: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub value: f64,
    pub department: Department,
    pub status: AssetStatus,
    pub image_url: Option<String>,
    pub invoice: DocumentRef,
    pub commitment: DocumentRef,
    pub denf_se: DocumentRef,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AssetRecord {
    pub fn document(&self, kind: DocumentKind) -> &DocumentRef {
        match kind {
            DocumentKind::Invoice => &self.invoice,
            DocumentKind::Commitment => &self.commitment,
            DocumentKind::DenfSe => &self.denf_se,
        }
    }

    pub fn is_written_off(&self) -> bool {
        self.status == AssetStatus::WrittenOff
    }

    /// 编辑表单预填。
    pub fn to_fields(&self) -> AssetFields {
        AssetFields {
            plate: self.plate.clone(),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            acquisition_date: self
                .acquisition_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            value: format!("{:.2}", self.value),
            department: self.department.as_str().to_string(),
            status: self.status.as_str().to_string(),
            invoice_number: self.invoice.number.clone().unwrap_or_default(),
            commitment_number: self.commitment.number.clone().unwrap_or_default(),
            denf_se_number: self.denf_se.number.clone().unwrap_or_default(),
        }
    }
}

/// 列表过滤条件；字段为 None 表示不约束。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetFilter {
    pub department: Option<Department>,
    pub status: Option<AssetStatus>,
}

impl AssetFilter {
    pub fn new(department: Option<Department>, status: Option<AssetStatus>) -> Self {
        Self { department, status }
    }

    pub fn is_empty(&self) -> bool {
        self.department.is_none() && self.status.is_none()
    }

    pub fn matches(&self, record: &AssetRecord) -> bool {
        self.department.is_none_or(|dept| dept == record.department)
            && self.status.is_none_or(|status| status == record.status)
    }
}

/// 表单原始输入（全部为字符串）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetFields {
    pub plate: String,
    pub name: String,
    pub description: String,
    pub acquisition_date: String,
    pub value: String,
    pub department: String,
    pub status: String,
    pub invoice_number: String,
    pub commitment_number: String,
    pub denf_se_number: String,
}

/// 校验通过后的提交内容（不含 id 与审计字段）。
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDraft {
    pub plate: String,
    pub name: String,
    pub description: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub value: f64,
    pub department: Department,
    pub status: AssetStatus,
    pub invoice_number: Option<String>,
    pub commitment_number: Option<String>,
    pub denf_se_number: Option<String>,
}

impl AssetFields {
    /// 提交前校验；失败时不得发起请求。
    pub fn validate(&self) -> Result<AssetDraft, ValidationError> {
        let plate = require(&self.plate, "plate")?;
        let name = require(&self.name, "name")?;
        let department = require(&self.department, "department")?;
        let department = Department::parse(&department).ok_or_else(|| {
            ValidationError::new("department", format!("unknown department: {department}"))
        })?;
        let value = parse_value(&self.value)?;
        let status = match optional(&self.status) {
            None => AssetStatus::default(),
            Some(status) => AssetStatus::parse(&status).ok_or_else(|| {
                ValidationError::new("status", format!("unknown status: {status}"))
            })?,
        };
        let acquisition_date = match optional(&self.acquisition_date) {
            None => None,
            Some(date) => Some(NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
                ValidationError::new("acquisition_date", "expected YYYY-MM-DD")
            })?),
        };

        Ok(AssetDraft {
            plate,
            name,
            description: optional(&self.description),
            acquisition_date,
            value,
            department,
            status,
            invoice_number: optional(&self.invoice_number),
            commitment_number: optional(&self.commitment_number),
            denf_se_number: optional(&self.denf_se_number),
        })
    }
}

/// 解析用户输入的金额：接受 `,` 作为小数分隔符，必须为正数。
pub fn parse_value(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("value", "required"));
    }
    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replace(',', ".")
    };
    let value = normalized
        .parse::<f64>()
        .map_err(|_| ValidationError::new("value", format!("not a number: {trimmed}")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new("value", "must be greater than zero"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> AssetFields {
        AssetFields {
            plate: "PAT-001".to_string(),
            name: "Desk".to_string(),
            department: "administration".to_string(),
            value: "150.00".to_string(),
            status: "active".to_string(),
            ..AssetFields::default()
        }
    }

    #[test]
    fn parse_value_accepts_comma_separator() {
        assert_eq!(parse_value("150,50").expect("value"), 150.5);
        assert_eq!(parse_value(" 2500 ").expect("value"), 2500.0);
    }

    #[test]
    fn parse_value_rejects_non_positive_and_garbage() {
        assert!(parse_value("0").is_err());
        assert!(parse_value("-3").is_err());
        assert!(parse_value("abc").is_err());
        assert!(parse_value("inf").is_err());
        assert!(parse_value("1.500,00").is_err());
    }

    #[test]
    fn blank_status_defaults_to_active() {
        let mut fields = desk();
        fields.status = "  ".to_string();
        let draft = fields.validate().expect("draft");
        assert_eq!(draft.status, AssetStatus::Active);
    }

    #[test]
    fn fields_roundtrip_through_record_prefill() {
        let draft = desk().validate().expect("draft");
        let record = AssetRecord {
            id: "id-1".to_string(),
            plate: draft.plate,
            name: draft.name,
            description: None,
            acquisition_date: NaiveDate::from_ymd_opt(2023, 1, 15),
            value: draft.value,
            department: draft.department,
            status: draft.status,
            image_url: None,
            invoice: DocumentRef::default(),
            commitment: DocumentRef::default(),
            denf_se: DocumentRef::default(),
            created_at: None,
            updated_at: None,
        };
        let fields = record.to_fields();
        assert_eq!(fields.value, "150.00");
        assert_eq!(fields.acquisition_date, "2023-01-15");
        assert!(fields.validate().is_ok());
    }
}
