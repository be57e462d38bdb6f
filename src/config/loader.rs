// Configuration loader
//
// Layers, lowest precedence first: built-in defaults, the optional
// ~/.nessus-gateway/config.toml, environment variables, command-line flags.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::{BackendConfig, GatewayConfig, LoginCredentials};

/// Values taken from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Facade URL (`--api-url`)
    pub api_url: Option<String>,

    /// Force mock mode (`--mock`)
    pub force_mock: bool,

    /// Explicit config file (`--config`); must exist when given
    pub config_path: Option<PathBuf>,
}

/// Values taken from the process environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub api_url: Option<String>,
    pub force_mock: bool,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            api_url: get("MCP_API_URL"),
            force_mock: get("MCP_FORCE_MOCK").as_deref() == Some("true"),
            access_key: get("NESSUS_ACCESS_KEY"),
            secret_key: get("NESSUS_SECRET_KEY"),
            username: get("NESSUS_USERNAME"),
            password: get("NESSUS_PASSWORD"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    backend: FileBackendSection,
    #[serde(default)]
    login: Option<LoginCredentials>,
}

#[derive(Debug, Default, Deserialize)]
struct FileBackendSection {
    base_url: Option<String>,
    access_key: Option<String>,
    secret_key: Option<String>,
    #[serde(default)]
    force_mock: bool,
    timeout_secs: Option<u64>,
    max_retries: Option<u32>,
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".nessus-gateway/config.toml"))
}

/// Load configuration from every source
pub fn load_config(overrides: &ConfigOverrides) -> Result<GatewayConfig> {
    let file = match &overrides.config_path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            read_config_file(path)?
        }
        None => match default_config_path() {
            Some(path) if path.exists() => read_config_file(&path)?,
            _ => FileConfig::default(),
        },
    };

    Ok(merge(file, EnvConfig::from_env(), overrides))
}

/// Load from an explicit file plus explicit environment values
pub fn load_config_from(
    path: &Path,
    env: EnvConfig,
    overrides: &ConfigOverrides,
) -> Result<GatewayConfig> {
    let file = read_config_file(path)?;
    Ok(merge(file, env, overrides))
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn merge(file: FileConfig, env: EnvConfig, overrides: &ConfigOverrides) -> GatewayConfig {
    let api_url = overrides
        .api_url
        .clone()
        .or(env.api_url)
        .or(file.backend.base_url);
    let force_mock = overrides.force_mock || env.force_mock || file.backend.force_mock;

    let mut backend = BackendConfig::resolve(api_url, force_mock);
    backend.access_key = env.access_key.or(file.backend.access_key);
    backend.secret_key = env.secret_key.or(file.backend.secret_key);
    if let Some(timeout) = file.backend.timeout_secs {
        backend.timeout_secs = timeout;
    }
    if let Some(retries) = file.backend.max_retries {
        backend.max_retries = retries;
    }

    let login = match (env.username, env.password) {
        (Some(username), Some(password)) => Some(LoginCredentials { username, password }),
        _ => file.login,
    };

    GatewayConfig { backend, login }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_no_sources_means_mock() {
        let config = merge(
            FileConfig::default(),
            EnvConfig::default(),
            &ConfigOverrides::default(),
        );
        assert!(config.backend.use_mock);
        assert_eq!(config.backend.base_url, "http://localhost:8000");
        assert!(config.login.is_none());
    }

    #[test]
    fn test_env_url_selects_real_mode() {
        let env = env_from(&[("MCP_API_URL", "http://facade:9000")]);
        let config = merge(FileConfig::default(), env, &ConfigOverrides::default());
        assert!(!config.backend.use_mock);
        assert_eq!(config.backend.base_url, "http://facade:9000");
    }

    #[test]
    fn test_force_mock_flag_must_be_exactly_true() {
        let env = env_from(&[("MCP_API_URL", "http://facade:9000"), ("MCP_FORCE_MOCK", "yes")]);
        assert!(!env.force_mock);

        let env = env_from(&[("MCP_API_URL", "http://facade:9000"), ("MCP_FORCE_MOCK", "true")]);
        let config = merge(FileConfig::default(), env, &ConfigOverrides::default());
        assert!(config.backend.use_mock);
    }

    #[test]
    fn test_cli_url_beats_env() {
        let env = env_from(&[("MCP_API_URL", "http://env:1")]);
        let overrides = ConfigOverrides {
            api_url: Some("http://cli:2".to_string()),
            ..Default::default()
        };
        let config = merge(FileConfig::default(), env, &overrides);
        assert_eq!(config.backend.base_url, "http://cli:2");
    }

    #[test]
    fn test_empty_env_values_ignored() {
        let env = env_from(&[("MCP_API_URL", "")]);
        assert_eq!(env.api_url, None);
    }

    #[test]
    fn test_env_login_needs_both_fields() {
        let env = env_from(&[("NESSUS_USERNAME", "admin")]);
        let config = merge(FileConfig::default(), env, &ConfigOverrides::default());
        assert!(config.login.is_none());
    }
}
