use patrimony_config::{ClientConfig, DEFAULT_API_URL, DEFAULT_SESSION_FILE};

#[test]
fn defaults_apply_when_env_is_empty() {
    unsafe {
        for key in [
            "PATRIMONY_API_URL",
            "PATRIMONY_UPLOAD_BASE_URL",
            "PATRIMONY_SESSION_FILE",
            "PATRIMONY_HTTP_TIMEOUT_SECONDS",
        ] {
            std::env::remove_var(key);
        }
    }

    let config = ClientConfig::from_env().expect("config");
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.session_file.to_str(), Some(DEFAULT_SESSION_FILE));
}
