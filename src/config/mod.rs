// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{default_config_path, load_config, load_config_from, ConfigOverrides, EnvConfig};
pub use settings::{
    BackendConfig, BackendMode, GatewayConfig, LoginCredentials, DEFAULT_BASE_URL,
    DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};
