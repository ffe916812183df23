//! 内存存储实现（用于测试与演示）

mod key_value;

pub use key_value::InMemoryKeyValueStore;
