//! 键值内存存储实现
//!
//! 进程退出即丢失，仅用于测试和 `--ephemeral` 运行。

use crate::error::StorageError;
use crate::traits::KeyValueStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// 键值内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置条目。
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .read()
            .ok()
            .and_then(|map| map.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self
            .entries
            .write()
            .map_err(|_| StorageError::new("key-value store lock poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self
            .entries
            .write()
            .map_err(|_| StorageError::new("key-value store lock poisoned"))?;
        map.remove(key);
        Ok(())
    }
}
