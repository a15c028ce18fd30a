//! Configuration management
//!
//! All values are fixed inputs at construction time; nothing here is mutated
//! once the gateway and readers are built.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_MIN_REQUEST_INTERVAL_MS, DEFAULT_PAGE_SIZE,
    DEFAULT_PROGRESS_EVERY, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_URL, MAX_PAGE_SIZE,
};
use crate::errors::{HrSyncError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Reject configurations that cannot produce a working pass.
    ///
    /// # Errors
    /// Returns `HrSyncError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.auth.validate()?;
        self.sync.validate()
    }
}

/// Upstream resource API settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub page_size: u32,
    pub min_request_interval_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            min_request_interval_ms: DEFAULT_MIN_REQUEST_INTERVAL_MS,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Page size clamped to the upstream maximum.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub const fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .map_err(|e| HrSyncError::Config(format!("Invalid api.base_url: {e}")))?;
        if self.page_size == 0 {
            return Err(HrSyncError::Config("api.page_size must be greater than 0".into()));
        }
        if self.timeout_secs == 0 {
            return Err(HrSyncError::Config("api.timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Upstream environment the credentials belong to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionEnvironment {
    #[default]
    Unknown,
    Production,
    Test,
}

/// OAuth2 client-credentials settings
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    #[serde(default = "default_token_url")]
    pub token_url: String,
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// PEM bundle (certificate followed by private key)
    #[serde(default, skip_serializing)]
    pub client_certificate_pem: Option<String>,
    /// Same PEM bundle, base64 encoded
    #[serde(default, skip_serializing)]
    pub client_certificate_base64: Option<String>,
    #[serde(default)]
    pub environment: ConnectionEnvironment,
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            client_id: String::new(),
            client_secret: String::new(),
            client_certificate_pem: None,
            client_certificate_base64: None,
            environment: ConnectionEnvironment::Unknown,
        }
    }
}

impl AuthConfig {
    /// Whether a TLS client certificate was supplied in either form.
    pub const fn has_client_certificate(&self) -> bool {
        self.client_certificate_pem.is_some() || self.client_certificate_base64.is_some()
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.token_url)
            .map_err(|e| HrSyncError::Config(format!("Invalid auth.token_url: {e}")))?;
        if self.client_id.trim().is_empty() {
            return Err(HrSyncError::Config("auth.client_id is required".into()));
        }
        if self.client_secret.trim().is_empty() {
            return Err(HrSyncError::Config("auth.client_secret is required".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("has_client_certificate", &self.has_client_certificate())
            .field("environment", &self.environment)
            .finish()
    }
}

/// Pass execution settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Parents in flight at once during hierarchical expansion
    pub concurrency: usize,
    /// Emit a progress log line every this many parents
    pub progress_every: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { concurrency: DEFAULT_CONCURRENCY, progress_every: DEFAULT_PROGRESS_EVERY }
    }
}

impl SyncConfig {
    fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(HrSyncError::Config("sync.concurrency must be greater than 0".into()));
        }
        Ok(())
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
