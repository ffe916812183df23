//! 客户端运行配置加载。

use std::env;
use std::path::PathBuf;

/// 后端地址缺省值。
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// 会话文件缺省路径。
pub const DEFAULT_SESSION_FILE: &str = ".patrimony-session.json";

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 客户端运行配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST 后端根地址（不含末尾 `/`）。
    pub api_url: String,
    /// 上传文件的访问前缀，用于补全相对图片地址。
    pub upload_base_url: String,
    /// 会话持久化文件。
    pub session_file: PathBuf,
    /// 请求超时；None 表示不设置。
    pub http_timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            upload_base_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            http_timeout_seconds: None,
        }
    }
}

impl ClientConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = read_url_with_default("PATRIMONY_API_URL", DEFAULT_API_URL)?;
        let upload_base_url = read_url_with_default("PATRIMONY_UPLOAD_BASE_URL", &api_url)?;
        let session_file = read_optional("PATRIMONY_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));
        let http_timeout_seconds =
            read_optional_u64("PATRIMONY_HTTP_TIMEOUT_SECONDS")?.filter(|value| *value > 0);

        Ok(Self {
            api_url,
            upload_base_url,
            session_file,
            http_timeout_seconds,
        })
    }
}

/// 读取 http(s) 地址，去掉末尾 `/`。
fn read_url_with_default(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = read_optional(key).unwrap_or_else(|| default.to_string());
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid(key.to_string(), value));
    }
    Ok(trimmed.to_string())
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn read_optional_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key.to_string(), value)),
        Err(_) => Ok(None),
    }
}
