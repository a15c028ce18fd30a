//! Traits for credential acquisition
//!
//! These traits enable dependency injection and testing by abstracting the
//! token endpoint and the credential cache.

use async_trait::async_trait;

use super::types::{Credential, TokenError, TokenGrant};

/// One round trip to a token endpoint.
///
/// Implementations must not cache; caching and coalescing belong to
/// [`TokenManager`](super::TokenManager).
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Request a fresh grant
    ///
    /// # Errors
    /// Returns [`TokenError`] for non-2xx responses, unparsable bodies and
    /// transport failures.
    async fn fetch_token(&self) -> Result<TokenGrant, TokenError>;
}

/// Supplies bearer credentials to outgoing requests
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Current credential, refreshing first if none is held.
    async fn ensure_authorized(&self) -> Result<Credential, TokenError>;

    /// Replace `stale` after the upstream rejected it.
    ///
    /// Concurrent callers holding the same stale credential share a single
    /// refresh.
    async fn handle_unauthorized(&self, stale: &Credential) -> Result<Credential, TokenError>;
}
