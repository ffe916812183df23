//! 稳定的线上 DTO 与字段映射契约。
//!
//! 后端字段使用下划线命名（`acquisition_date`、`image_url`），
//! 客户端领域模型使用 `domain` 中的类型。两者之间的转换在本 crate
//! 中显式完成，读写两个方向都不假设结构一致。

mod asset;
mod auth;
mod error;
mod image;
mod lenient;
mod stats;
mod transfer;

pub use asset::{
    AssetPayload, CreatedAsset, DecodedAssets, SkippedAsset, UploadedFile, WireAsset,
};
pub use auth::{LoginRequest, LoginResponse, RegisterRequest, WireUser};
pub use error::{ContractError, ErrorBody, decode_error_message};
pub use image::normalize_image_url;
pub use stats::{WireDepartmentStats, WireStats};
pub use transfer::{TransferPayload, WireTransfer};

/// 资产集合接口路径。
pub const PATRIMONY_PATH: &str = "/api/patrimony";
/// 统计接口路径。
pub const STATS_PATH: &str = "/api/stats";
/// 发起转移接口路径。
pub const TRANSFER_PATH: &str = "/api/transfer";
/// 转移历史接口路径。
pub const TRANSFERS_PATH: &str = "/api/transfers";
/// 登录接口路径。
pub const LOGIN_PATH: &str = "/api/login";
/// 注册接口路径。
pub const REGISTER_PATH: &str = "/api/register";
/// token 有效性探针。
pub const HEALTH_PATH: &str = "/api/health";

/// 单个资产路径。
pub fn patrimony_item_path(id: &str) -> String {
    format!("{PATRIMONY_PATH}/{id}")
}

/// 图片上传路径。
pub fn patrimony_image_path(id: &str) -> String {
    format!("{PATRIMONY_PATH}/{id}/image")
}

/// 文档上传路径。
pub fn patrimony_document_path(id: &str, kind: domain::DocumentKind) -> String {
    format!("{PATRIMONY_PATH}/{id}/document/{}", kind.path_segment())
}

/// 单条转移路径。
pub fn transfer_item_path(id: &str) -> String {
    format!("{TRANSFER_PATH}/{id}")
}
