//! Conversions from external infrastructure errors into domain errors.

use hrsync_common::{LimiterError, TokenError};
use hrsync_domain::HrSyncError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HrSyncError);

impl From<InfraError> for HrSyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HrSyncError> for InfraError {
    fn from(value: HrSyncError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoHrSyncError {
    fn into_hrsync(self) -> HrSyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HrSyncError */
/* -------------------------------------------------------------------------- */

impl IntoHrSyncError for HttpError {
    fn into_hrsync(self) -> HrSyncError {
        if self.is_timeout() {
            return HrSyncError::Transport("HTTP request timed out".into());
        }

        if self.is_connect() {
            return HrSyncError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return HrSyncError::Deserialization(self.to_string());
        }

        if let Some(status) = self.status() {
            return HrSyncError::HttpStatus { status: status.as_u16(), body: String::new() };
        }

        HrSyncError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_hrsync())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → HrSyncError */
/* -------------------------------------------------------------------------- */

impl IntoHrSyncError for JsonError {
    fn into_hrsync(self) -> HrSyncError {
        HrSyncError::Deserialization(self.to_string())
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_hrsync())
    }
}

/* -------------------------------------------------------------------------- */
/* TokenError / LimiterError → HrSyncError */
/* -------------------------------------------------------------------------- */

impl IntoHrSyncError for TokenError {
    fn into_hrsync(self) -> HrSyncError {
        HrSyncError::Auth(self.to_string())
    }
}

impl From<TokenError> for InfraError {
    fn from(value: TokenError) -> Self {
        Self(value.into_hrsync())
    }
}

impl IntoHrSyncError for LimiterError {
    fn into_hrsync(self) -> HrSyncError {
        match self {
            LimiterError::Cancelled => HrSyncError::Cancelled,
            LimiterError::ZeroRate => HrSyncError::Config(self.to_string()),
        }
    }
}

impl From<LimiterError> for InfraError {
    fn from(value: LimiterError) -> Self {
        Self(value.into_hrsync())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn http_status_maps_to_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::SERVICE_UNAVAILABLE))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        let mapped: HrSyncError = InfraError::from(error).into();
        assert_eq!(mapped.status(), Some(503));
    }

    #[tokio::test]
    async fn refused_connection_maps_to_transport() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: HrSyncError = InfraError::from(error).into();
        assert!(matches!(mapped, HrSyncError::Transport(_)), "got {mapped:?}");
    }

    #[test]
    fn malformed_json_maps_to_deserialization() {
        let error = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let mapped: HrSyncError = InfraError::from(error).into();
        assert!(matches!(mapped, HrSyncError::Deserialization(_)));
    }

    #[test]
    fn token_failures_are_authentication_errors() {
        let error = TokenError::Endpoint { status: 401, body: "invalid_client".into() };
        let mapped: HrSyncError = InfraError::from(error).into();

        match mapped {
            HrSyncError::Auth(message) => assert!(message.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[test]
    fn limiter_cancellation_maps_to_cancelled() {
        let mapped: HrSyncError = InfraError::from(LimiterError::Cancelled).into();
        assert!(mapped.is_cancelled());
    }
}
