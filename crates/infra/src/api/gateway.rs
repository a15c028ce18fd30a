//! Rate-limited, auth-aware gateway to the resource API
//!
//! Every resource request goes through [`RateLimitedGateway`]:
//! 1. Cancellation is checked before anything is sent
//! 2. A slot is taken from the shared [`MinIntervalLimiter`]
//! 3. The current bearer credential is attached
//! 4. 401 triggers one forced refresh and a resend; 403 does the same, but
//!    only once per gateway lifetime
//! 5. Non-2xx becomes `HttpStatus` (status and body kept), bad JSON becomes
//!    `Deserialization`
//!
//! Nothing is retried beyond the single re-auth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hrsync_common::auth::{Credential, CredentialProvider, TokenError};
use hrsync_common::MinIntervalLimiter;
use hrsync_domain::{HrSyncError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::errors::InfraError;
use crate::http::HttpClient;

/// Throttled, authenticated GET access to one upstream API.
pub struct RateLimitedGateway {
    http: HttpClient,
    base_url: Url,
    limiter: Arc<MinIntervalLimiter>,
    credentials: Arc<dyn CredentialProvider>,
    forbidden_reauth_used: AtomicBool,
}

impl RateLimitedGateway {
    /// Create a gateway
    ///
    /// # Arguments
    ///
    /// * `http` - Transport for resource calls
    /// * `base_url` - Resource API root; paths are joined onto it
    /// * `limiter` - The limiter for this upstream account, shared with every
    ///   other gateway using the same quota
    /// * `credentials` - Bearer credential supplier
    ///
    /// # Errors
    ///
    /// Returns `HrSyncError::Config` if `base_url` does not parse
    pub fn new(
        http: HttpClient,
        base_url: &str,
        limiter: Arc<MinIntervalLimiter>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url)
            .map_err(|err| HrSyncError::Config(format!("Invalid base URL {base_url}: {err}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            limiter,
            credentials,
            forbidden_reauth_used: AtomicBool::new(false),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// `Transport`, `HttpStatus`, `Auth`, `Deserialization`, or `Cancelled`.
    /// An empty body is a `Deserialization` error.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        cancel: &CancellationToken,
    ) -> Result<T> {
        self.get_optional(path, query, cancel).await?.ok_or_else(|| {
            HrSyncError::Deserialization(format!("{path} returned an empty body"))
        })
    }

    /// GET `path`; `204 No Content` or an empty body yields `None`.
    ///
    /// # Errors
    ///
    /// Same as [`get_json`](Self::get_json), minus the empty-body case.
    #[instrument(skip(self, query, cancel), fields(path = %path))]
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        cancel: &CancellationToken,
    ) -> Result<Option<T>> {
        let url = self.url(path, query)?;
        let response = self.send_authorized(&url, cancel).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await.map_err(|err| HrSyncError::from(InfraError::from(err)))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| HrSyncError::from(InfraError::from(err)))
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| HrSyncError::Config(format!("Invalid request path {path}: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn send_authorized(&self, url: &Url, cancel: &CancellationToken) -> Result<Response> {
        let mut credential = self.credentials.ensure_authorized().await.map_err(auth_error)?;
        let mut refreshed = false;

        loop {
            let response = self.send_once(url, &credential, cancel).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            let reauth = match status {
                StatusCode::UNAUTHORIZED => !refreshed,
                StatusCode::FORBIDDEN => {
                    !refreshed && !self.forbidden_reauth_used.swap(true, Ordering::SeqCst)
                }
                _ => false,
            };

            if reauth {
                warn!(
                    status = status.as_u16(),
                    version = credential.version(),
                    "credential rejected; refreshing"
                );
                refreshed = true;
                credential =
                    self.credentials.handle_unauthorized(&credential).await.map_err(auth_error)?;
                continue;
            }

            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(status = status.as_u16(), error = %err, "error response body unreadable");
                    String::new()
                }
            };
            if status == StatusCode::UNAUTHORIZED {
                return Err(HrSyncError::Auth(format!(
                    "credential rejected after refresh (HTTP 401): {body}"
                )));
            }
            return Err(HrSyncError::HttpStatus { status: status.as_u16(), body });
        }
    }

    async fn send_once(
        &self,
        url: &Url,
        credential: &Credential,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        if cancel.is_cancelled() {
            return Err(HrSyncError::Cancelled);
        }
        self.limiter
            .acquire_cancellable(cancel)
            .await
            .map_err(|err| HrSyncError::from(InfraError::from(err)))?;

        debug!(path = url.path(), "resource request");
        let request = self
            .http
            .request(Method::GET, url.clone())
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, credential.bearer_header());
        self.http.send(request).await
    }
}

fn auth_error(err: TokenError) -> HrSyncError {
    InfraError::from(err).into()
}
