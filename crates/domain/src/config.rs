//! Configuration structures
//!
//! Deserializable from JSON or TOML. Credential keys accept both the
//! snake_case names used here and the camelCase names used by the vendor's
//! credential form (`baseUrl`, `clientId`).

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_TTL_SECS};
use crate::errors::{DentalOfficeError, Result};

/// Client credentials issued by Dental Office for one customer instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Customer-specific API base URL, e.g. `https://acme.api.app.dentaloffice.com.br`
    #[serde(alias = "baseUrl")]
    pub base_url: String,
    #[serde(alias = "clientId")]
    pub client_id: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self { base_url: base_url.into(), client_id: client_id.into(), secret: secret.into() }
    }

    /// Identity used to key cached tokens: `"{base_url}:{client_id}"`.
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.base_url, self.client_id)
    }

    /// Base URL without trailing slashes, ready for appending `/v1/...` paths.
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Build an absolute URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.api_base(), path)
    }

    /// All three fields are required.
    ///
    /// # Errors
    /// Returns `DentalOfficeError::Config` naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in
            [("base_url", &self.base_url), ("client_id", &self.client_id), ("secret", &self.secret)]
        {
            if value.trim().is_empty() {
                return Err(DentalOfficeError::Config(format!("credential `{name}` is empty")));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_TIMEOUT_SECS, user_agent: None }
    }
}

/// Token cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long an issued token is reused before a new one is requested.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { token_ttl_secs: DEFAULT_TOKEN_TTL_SECS }
    }
}

/// Top-level adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub credentials: Credentials,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials, http: HttpConfig::default(), auth: AuthConfig::default() }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}
