//! 存储接口 Trait 定义
//!
//! - KeyValueStore：持久化字符串键值
//! - SessionStore：会话的读取、保存与清除
//!
//! 所有接口返回 StorageError，使用 async_trait 支持动态分发。

use crate::error::StorageError;
use async_trait::async_trait;
use domain::Session;

/// 键值存储接口
///
/// 写入后对同一实例的后续读取立即可见。
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// 删除不存在的键不是错误。
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// 会话存储接口
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 读取持久化会话；缺失时返回未登录会话。
    async fn load(&self) -> Result<Session, StorageError>;

    async fn save(&self, session: &Session) -> Result<(), StorageError>;

    async fn clear(&self) -> Result<(), StorageError>;
}
