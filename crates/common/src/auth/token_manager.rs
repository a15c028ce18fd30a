//! Token manager with coalesced refresh
//!
//! Manages the bearer credential lifecycle:
//! - Lazy acquisition on first use
//! - Forced refresh after the upstream rejects the current credential
//! - A single token-endpoint round trip per refresh event, however many
//!   callers asked for it

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex as StateLock;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::traits::{CredentialProvider, TokenSource};
use super::types::{Credential, TokenError, TokenState};

/// Outcome of the most recent token-endpoint round trip
struct LastAttempt {
    /// Increments once per completed round trip
    sequence: u64,
    error: Option<TokenError>,
}

/// Caches one bearer credential and refreshes it on demand.
///
/// Refreshes are serialized through a gate. A caller that queued behind a
/// refresh re-checks after acquiring the gate and takes the result of that
/// refresh (credential or error) instead of issuing its own request.
pub struct TokenManager<S: TokenSource + 'static> {
    source: Arc<S>,
    current: RwLock<Option<Credential>>,
    refresh_gate: Mutex<()>,
    last_attempt: StateLock<LastAttempt>,
    next_version: AtomicU64,
    state: StateLock<TokenState>,
}

impl<S: TokenSource + 'static> TokenManager<S> {
    /// Create a token manager with no credential held
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            current: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            last_attempt: StateLock::new(LastAttempt { sequence: 0, error: None }),
            next_version: AtomicU64::new(0),
            state: StateLock::new(TokenState::NoToken),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> TokenState {
        *self.state.lock()
    }

    /// Number of token-endpoint round trips performed so far
    pub fn refresh_count(&self) -> u64 {
        self.last_attempt.lock().sequence
    }

    /// Return the held credential, acquiring one first if none is held.
    ///
    /// # Errors
    /// Propagates the [`TokenError`] of the refresh this call waited on.
    pub async fn ensure_authorized(&self) -> Result<Credential, TokenError> {
        if let Some(credential) = self.current.read().await.clone() {
            return Ok(credential);
        }
        self.refresh(None).await
    }

    /// Replace a credential the upstream rejected.
    ///
    /// If another caller already replaced `stale`, its replacement is
    /// returned without contacting the token endpoint.
    ///
    /// # Errors
    /// Propagates the [`TokenError`] of the refresh this call waited on.
    pub async fn handle_unauthorized(&self, stale: &Credential) -> Result<Credential, TokenError> {
        self.refresh(Some(stale.version())).await
    }

    #[instrument(skip(self), fields(stale_version = ?stale_version))]
    async fn refresh(&self, stale_version: Option<u64>) -> Result<Credential, TokenError> {
        let sequence_on_entry = self.last_attempt.lock().sequence;
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.current.read().await.as_ref() {
            let newer = stale_version.map_or(true, |stale| current.version() > stale);
            if newer {
                debug!(
                    version = current.version(),
                    "credential already refreshed by another caller"
                );
                return Ok(current.clone());
            }
        }

        {
            let last = self.last_attempt.lock();
            if last.sequence != sequence_on_entry {
                if let Some(error) = last.error.clone() {
                    debug!("sharing result of the refresh that failed while waiting");
                    return Err(error);
                }
            }
        }

        *self.state.lock() = TokenState::Authorizing;
        let outcome = self.source.fetch_token().await;

        let outcome = {
            let mut last = self.last_attempt.lock();
            last.sequence += 1;
            match outcome {
                Ok(grant) => {
                    last.error = None;
                    let version = self.next_version.fetch_add(1, Ordering::SeqCst) + 1;
                    Ok(Credential::new(grant.access_token, version))
                }
                Err(error) => {
                    last.error = Some(error.clone());
                    Err(error)
                }
            }
        };

        match outcome {
            Ok(credential) => {
                *self.current.write().await = Some(credential.clone());
                *self.state.lock() = TokenState::Authorized;
                info!(version = credential.version(), "bearer credential refreshed");
                Ok(credential)
            }
            Err(error) => {
                *self.current.write().await = None;
                *self.state.lock() = TokenState::Failed;
                warn!(error = %error, "bearer credential refresh failed");
                Err(error)
            }
        }
    }
}

#[async_trait]
impl<S: TokenSource + 'static> CredentialProvider for TokenManager<S> {
    async fn ensure_authorized(&self) -> Result<Credential, TokenError> {
        TokenManager::ensure_authorized(self).await
    }

    async fn handle_unauthorized(&self, stale: &Credential) -> Result<Credential, TokenError> {
        TokenManager::handle_unauthorized(self, stale).await
    }
}
