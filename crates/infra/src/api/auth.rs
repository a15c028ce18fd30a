//! OAuth2 client-credentials token source
//!
//! Exchanges the configured client id and secret for a bearer token. The
//! same TLS client identity used for resource calls is presented here.

use async_trait::async_trait;
use hrsync_common::auth::{TokenError, TokenGrant, TokenSource};
use hrsync_domain::AuthConfig;
use reqwest::header::ACCEPT;
use reqwest::Method;
use tracing::{debug, instrument};

use crate::http::HttpClient;

/// Posts `grant_type=client_credentials` to the token endpoint.
pub struct ClientCredentialsSource {
    http: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentialsSource {
    /// Create a token source
    ///
    /// # Arguments
    ///
    /// * `http` - Client carrying the TLS identity, if any
    /// * `auth` - Token URL and client credentials
    pub fn new(http: HttpClient, auth: &AuthConfig) -> Self {
        Self {
            http,
            token_url: auth.token_url.clone(),
            client_id: auth.client_id.clone(),
            client_secret: auth.client_secret.clone(),
        }
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsSource {
    #[instrument(skip(self), fields(token_url = %self.token_url))]
    async fn fetch_token(&self) -> Result<TokenGrant, TokenError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let request = self
            .http
            .request(Method::POST, &self.token_url)
            .header(ACCEPT, "application/json")
            .form(&form);

        let response =
            self.http.send(request).await.map_err(|err| TokenError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|err| TokenError::Transport(err.to_string()))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "token endpoint rejected the request");
            return Err(TokenError::Endpoint { status: status.as_u16(), body });
        }

        let grant: TokenGrant =
            serde_json::from_str(&body).map_err(|err| TokenError::Malformed(err.to_string()))?;
        if grant.access_token.trim().is_empty() {
            return Err(TokenError::Malformed("access_token is empty".into()));
        }

        Ok(grant)
    }
}
