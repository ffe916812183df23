//! 资源客户端：认证请求 → 响应校验 → 结构映射 → 错误归一。
//!
//! - `transport`：传输抽象（`Transport` trait）
//! - `http_transport`：基于 reqwest 的传输实现
//! - `executor`：统一请求执行（请求头、request_id、401 拦截、错误解码）
//! - `patrimony` / `transfer` / `stats` / `auth`：各接口客户端
//! - `in_memory`：内存后端（测试与演示）

mod auth;
mod error;
mod executor;
mod http_transport;
pub mod in_memory;
mod patrimony;
mod stats;
mod transfer;
mod transport;

pub use auth::AuthClient;
pub use error::{ClientError, NETWORK_ERROR_MESSAGE};
pub use executor::ApiExecutor;
pub use http_transport::HttpTransport;
pub use in_memory::InMemoryBackend;
pub use patrimony::PatrimonyClient;
pub use stats::StatsAggregator;
pub use transfer::{TransferReceipt, TransferWorkflow};
pub use transport::{
    ApiRequest, FileUpload, MultipartField, RawResponse, RequestBody, Transport, TransportError,
};
