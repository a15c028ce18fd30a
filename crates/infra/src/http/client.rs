use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hrsync_domain::{AuthConfig, HrSyncError};
use reqwest::{Client as ReqwestClient, Identity, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with a fixed timeout and optional TLS client identity.
///
/// Sends each request exactly once. Whether and how to retry is up to the
/// caller.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, HrSyncError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// Any response, including non-2xx, is returned as-is; only transport
    /// failures become errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, HrSyncError> {
        let request = builder.build().map_err(|err| HrSyncError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, url = %url.path(), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(
                    %method,
                    url = %url.path(),
                    status = %response.status(),
                    "received HTTP response"
                );
                Ok(response)
            }
            Err(err) => {
                debug!(%method, url = %url.path(), error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    identity_pem: Option<Vec<u8>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: None,
            identity_pem: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Present this TLS client identity (PEM certificate followed by its
    /// private key) on every connection.
    pub fn identity_pem(mut self, pem: Vec<u8>) -> Self {
        self.identity_pem = Some(pem);
        self
    }

    pub fn build(self) -> Result<HttpClient, HrSyncError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(pem) = self.identity_pem {
            let identity = Identity::from_pem(&pem).map_err(|err| {
                HrSyncError::Config(format!("Invalid client certificate: {err}"))
            })?;
            builder = builder.use_rustls_tls().identity(identity);
        }

        let client = builder.build().map_err(|err| HrSyncError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}

/// The client certificate configured in `auth`, as PEM bytes.
///
/// The plain PEM wins when both forms are present.
///
/// # Errors
/// Returns `HrSyncError::Config` when the base64 form does not decode.
pub fn decode_identity_pem(auth: &AuthConfig) -> Result<Option<Vec<u8>>, HrSyncError> {
    if let Some(pem) = auth.client_certificate_pem.as_deref().filter(|pem| !pem.trim().is_empty()) {
        return Ok(Some(pem.as_bytes().to_vec()));
    }

    match auth.client_certificate_base64.as_deref().map(str::trim) {
        Some(encoded) if !encoded.is_empty() => {
            let compact: String = encoded.split_whitespace().collect();
            STANDARD.decode(compact).map(Some).map_err(|err| {
                HrSyncError::Config(format!(
                    "auth.client_certificate_base64 is not valid base64: {err}"
                ))
            })
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Method, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_with_defaults() -> HttpClient {
        HttpClient::builder().timeout(Duration::from_secs(5)).build().expect("http client")
    }

    #[tokio::test]
    async fn sends_exactly_once_even_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn network_failure_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED
        let url = format!("http://{addr}");

        let client = client_with_defaults();
        let result = client.send(client.request(Method::GET, &url)).await;
        match result {
            Err(HrSyncError::Transport(msg)) => {
                assert!(msg.to_lowercase().contains("connection"));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let client = HttpClient::builder().timeout(Duration::from_millis(50)).build().unwrap();
        let err = client.send(client.request(Method::GET, server.uri())).await.unwrap_err();

        assert_eq!(err, HrSyncError::Transport("HTTP request timed out".into()));
    }

    #[test]
    fn invalid_identity_is_config_error() {
        let result = HttpClient::builder().identity_pem(b"not a pem".to_vec()).build();
        assert!(matches!(result, Err(HrSyncError::Config(_))));
    }

    #[test]
    fn identity_prefers_plain_pem() {
        let auth = AuthConfig {
            client_certificate_pem: Some("-----BEGIN CERTIFICATE-----".into()),
            client_certificate_base64: Some("ignored".into()),
            ..AuthConfig::default()
        };
        assert_eq!(
            decode_identity_pem(&auth).unwrap(),
            Some(b"-----BEGIN CERTIFICATE-----".to_vec())
        );
    }

    #[test]
    fn identity_decodes_wrapped_base64() {
        let encoded = STANDARD.encode("-----BEGIN CERTIFICATE-----\nabc\n");
        let (head, tail) = encoded.split_at(10);
        let auth = AuthConfig {
            client_certificate_base64: Some(format!("{head}\n  {tail}\n")),
            ..AuthConfig::default()
        };

        let pem = decode_identity_pem(&auth).unwrap().unwrap();
        assert!(pem.starts_with(b"-----BEGIN CERTIFICATE-----"));

        let bad =
            AuthConfig { client_certificate_base64: Some("***".into()), ..AuthConfig::default() };
        assert!(matches!(decode_identity_pem(&bad), Err(HrSyncError::Config(_))));
        assert_eq!(decode_identity_pem(&AuthConfig::default()).unwrap(), None);
    }
}
