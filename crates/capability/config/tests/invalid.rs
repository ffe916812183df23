use patrimony_config::{ClientConfig, ConfigError};

#[test]
fn reject_invalid_values() {
    unsafe {
        std::env::set_var("PATRIMONY_API_URL", "localhost:8080");
    }
    let err = ClientConfig::from_env().expect_err("scheme required");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "PATRIMONY_API_URL"));

    unsafe {
        std::env::set_var("PATRIMONY_API_URL", "http://localhost:9000");
        std::env::set_var("PATRIMONY_HTTP_TIMEOUT_SECONDS", "soon");
    }
    let err = ClientConfig::from_env().expect_err("timeout must be numeric");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "PATRIMONY_HTTP_TIMEOUT_SECONDS"));

    unsafe {
        std::env::set_var("PATRIMONY_HTTP_TIMEOUT_SECONDS", "0");
        std::env::set_var("PATRIMONY_UPLOAD_BASE_URL", "http://files.local/uploads/");
    }
    let config = ClientConfig::from_env().expect("config");
    assert_eq!(config.http_timeout_seconds, None);
    assert_eq!(config.upload_base_url, "http://files.local/uploads");
}
