use client::{
    Client, ClientConfig, ConfigError,
    config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE},
};
use std::fs;

const CONNECTION_ONLY: &str = "[deepseek]\napi_key = sk-file\nbase_url = https://api.deepseek.com\n";

#[test]
fn client_builds_from_file_with_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    fs::write(&path, CONNECTION_ONLY).unwrap();

    let client = Client::from_file(&path).unwrap();
    let config = client.config();
    assert_eq!(config.api_key, "sk-file");
    assert_eq!(config.base_url, "https://api.deepseek.com");
    assert_eq!(config.model, DEFAULT_MODEL);
    assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
}

#[test]
fn file_is_read_again_on_each_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");

    fs::write(&path, CONNECTION_ONLY).unwrap();
    let first = ClientConfig::from_file(&path).unwrap();

    fs::write(
        &path,
        format!("{CONNECTION_ONLY}\n[model_params]\nmodel = deepseek-reasoner\n"),
    )
    .unwrap();
    let second = ClientConfig::from_file(&path).unwrap();

    assert_eq!(first.model, DEFAULT_MODEL);
    assert_eq!(second.model, "deepseek-reasoner");
}

#[test]
fn utf8_values_are_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    fs::write(
        &path,
        format!("{CONNECTION_ONLY}\n[model_params]\nmodel = 深度求索-chat\n"),
    )
    .unwrap();

    let config = ClientConfig::from_file(&path).unwrap();
    assert_eq!(config.model, "深度求索-chat");
}

#[test]
fn missing_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Client::from_file(dir.path().join("absent.ini")).unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn missing_api_key_in_file_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.ini");
    fs::write(&path, "[deepseek]\nbase_url = https://api.deepseek.com\n").unwrap();

    let err = Client::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey("deepseek.api_key")));
    assert_eq!(
        err.to_string(),
        "missing required setting: deepseek.api_key"
    );
}
