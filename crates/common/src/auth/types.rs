//! Credential and token-endpoint types

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Successful token-endpoint response body.
///
/// Only `access_token` is required. The remaining fields are accepted so a
/// fuller response still parses, but they do not drive the lifecycle.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl TokenGrant {
    /// Grant carrying only an access token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            token_type: Some("Bearer".to_string()),
            expires_in: None,
        }
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Bearer credential plus the version that produced it.
///
/// Versions increase by one with every successful refresh, so a caller holding
/// a rejected credential can tell whether someone else already replaced it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
    version: u64,
}

impl Credential {
    pub fn new(token: impl Into<String>, version: u64) -> Self {
        Self { token: token.into(), version }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("version", &self.version)
            .finish()
    }
}

/// Observable lifecycle state of a [`TokenManager`](super::TokenManager).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    NoToken,
    Authorizing,
    Authorized,
    /// Last refresh failed; the next call starts a new one.
    Failed,
}

/// Failure of a token-endpoint round trip
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("token endpoint response malformed: {0}")]
    Malformed(String),

    #[error("token endpoint unreachable: {0}")]
    Transport(String),
}
