// Config file loading and layer precedence

use nessus_gateway::config::{
    load_config, load_config_from, BackendMode, ConfigOverrides, EnvConfig, DEFAULT_TIMEOUT_SECS,
};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_file_selects_real_mode() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[backend]
base_url = "http://nessus-facade:8000"
access_key = "file-ak"
secret_key = "file-sk"
timeout_secs = 10
max_retries = 0

[login]
username = "admin"
password = "hunter2"
"#,
    );

    let config =
        load_config_from(&path, EnvConfig::default(), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.backend.mode(), BackendMode::Real);
    assert_eq!(config.backend.base_url, "http://nessus-facade:8000");
    assert_eq!(config.backend.access_key.as_deref(), Some("file-ak"));
    assert_eq!(config.backend.timeout_secs, 10);
    assert_eq!(config.backend.max_retries, 0);

    let login = config.login.unwrap();
    assert_eq!(login.username, "admin");
    assert!(!format!("{:?}", login).contains("hunter2"));
}

#[test]
fn test_empty_file_means_mock_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let config =
        load_config_from(&path, EnvConfig::default(), &ConfigOverrides::default()).unwrap();
    assert!(config.backend.use_mock);
    assert_eq!(config.backend.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert!(config.login.is_none());
}

#[test]
fn test_env_and_cli_layer_over_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[backend]
base_url = "http://file:1"
access_key = "file-ak"
secret_key = "file-sk"
"#,
    );

    let env = EnvConfig {
        api_url: Some("http://env:2".to_string()),
        access_key: Some("env-ak".to_string()),
        secret_key: Some("env-sk".to_string()),
        ..Default::default()
    };
    let config = load_config_from(&path, env.clone(), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.backend.base_url, "http://env:2");
    assert_eq!(config.backend.access_key.as_deref(), Some("env-ak"));

    let overrides = ConfigOverrides {
        api_url: Some("http://cli:3".to_string()),
        force_mock: true,
        config_path: None,
    };
    let config = load_config_from(&path, env, &overrides).unwrap();
    assert_eq!(config.backend.base_url, "http://cli:3");
    assert_eq!(config.backend.mode(), BackendMode::Mock);
}

#[test]
fn test_force_mock_in_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[backend]
base_url = "http://file:1"
force_mock = true
"#,
    );

    let config =
        load_config_from(&path, EnvConfig::default(), &ConfigOverrides::default()).unwrap();
    assert!(config.backend.use_mock);
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[backend\nbase_url = ");

    let result = load_config_from(&path, EnvConfig::default(), &ConfigOverrides::default());
    assert!(result.is_err());
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let overrides = ConfigOverrides {
        config_path: Some(dir.path().join("absent.toml")),
        ..Default::default()
    };

    let err = load_config(&overrides).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}
