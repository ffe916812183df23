//! # Patrimony Storage 模块
//!
//! 客户端本地持久化：跨进程保存登录会话。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`KeyValueStore` 与 `SessionStore` 异步 Trait
//! 2. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 3. **实现层**：
//!    - `in_memory/`：内存键值存储（测试与一次性运行）
//!    - `file.rs`：JSON 文件键值存储（命令行默认）
//!    - `session.rs`：基于任意键值存储的会话存储
//!
//! ## 持久化约定
//!
//! 会话只占用两个固定键：
//!
//! - `token`：Bearer 凭证原文
//! - `user`：JSON 编码的 `UserProfile`
//!
//! 任一键缺失即视为未登录；清除会话时两个键同时删除。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use patrimony_storage::{FileKeyValueStore, KeyValueSessionStore, SessionStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(FileKeyValueStore::new(".patrimony-session.json"));
//! let sessions = KeyValueSessionStore::new(store);
//! let session = sessions.load().await?;
//! ```

pub mod error;
pub mod file;
pub mod in_memory;
pub mod session;
pub mod traits;

pub use error::*;
pub use file::FileKeyValueStore;
pub use in_memory::InMemoryKeyValueStore;
pub use session::{KeyValueSessionStore, TOKEN_KEY, USER_KEY};
pub use traits::*;
