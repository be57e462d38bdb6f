// Configuration structs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Facade address used when none is configured (mock mode is forced then)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Upper bound on a single facade request
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Extra attempts after a network failure
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Which backend adapter serves every operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    Mock,
    Real,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Mock => "mock",
            BackendMode::Real => "real",
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection configuration owned by a backend client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Root URL of the Nessus facade
    pub base_url: String,

    /// Session token returned by POST /session
    pub token: Option<String>,

    /// Explicit Nessus API key pair
    pub access_key: Option<String>,
    pub secret_key: Option<String>,

    /// Serve everything from the in-memory store
    pub use_mock: bool,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Retries for network failures (0 disables retry)
    pub max_retries: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            access_key: None,
            secret_key: None,
            use_mock: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl BackendConfig {
    /// Mock-mode configuration with defaults
    pub fn mock() -> Self {
        Self::default()
    }

    /// Real-mode configuration against `base_url`
    pub fn real(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            use_mock: false,
            ..Self::default()
        }
    }

    /// Pick the mode from the two startup signals
    ///
    /// A missing base URL forces mock mode regardless of `force_mock`.
    pub fn resolve(api_url: Option<String>, force_mock: bool) -> Self {
        let use_mock = force_mock || api_url.is_none();
        Self {
            base_url: api_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            use_mock,
            ..Self::default()
        }
    }

    pub fn with_api_keys(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn mode(&self) -> BackendMode {
        if self.use_mock {
            BackendMode::Mock
        } else {
            BackendMode::Real
        }
    }
}

/// Username/password exchanged for a session token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything the gateway needs at startup
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub backend: BackendConfig,

    /// Login performed at startup in real mode
    pub login: Option<LoginCredentials>,
}
