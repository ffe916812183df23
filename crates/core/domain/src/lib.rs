pub mod asset;
pub mod session;
pub mod stats;
pub mod transfer;
pub mod validation;

pub use asset::{
    AssetDraft, AssetFields, AssetFilter, AssetRecord, AssetStatus, Department, DocumentKind,
    DocumentRef,
};
pub use session::{Session, UserProfile};
pub use stats::{DepartmentStats, StatsSnapshot};
pub use transfer::{TransferRecord, TransferRequest};
pub use validation::ValidationError;
