//! Shared fixtures for the wiremock-backed integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use hrsync_domain::{ApiConfig, AuthConfig, Config};
use hrsync_infra::AdpClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use parking_lot::Mutex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TOKEN_PATH: &str = "/auth/oauth/v2/token";
pub const WORKERS_PATH: &str = "/hr/v2/workers";

/// Configuration pointing every endpoint at `server`, unthrottled.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            base_url: format!("{}/", server.uri()),
            timeout_secs: 5,
            min_request_interval_ms: 0,
            ..ApiConfig::default()
        },
        auth: AuthConfig {
            token_url: format!("{}{TOKEN_PATH}", server.uri()),
            client_id: "client".into(),
            client_secret: "secret".into(),
            ..AuthConfig::default()
        },
        ..Config::default()
    }
}

pub fn client_for(server: &MockServer) -> Arc<AdpClient> {
    Arc::new(AdpClient::from_config(&config_for(server)).expect("client should build"))
}

pub fn token_body(token: &str) -> Value {
    json!({ "access_token": token, "token_type": "Bearer", "expires_in": 3600 })
}

/// Token endpoint that always grants `token`.
pub async fn mount_token(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(token)))
        .mount(server)
        .await;
}

pub fn worker(oid: &str) -> Value {
    json!({
        "associateOID": oid,
        "workerID": { "idValue": format!("ID-{oid}") },
        "person": { "legalName": { "givenName": "Test", "familyName1": oid } }
    })
}

/// Workers endpoint serving `oids` as a single short page.
pub async fn mount_workers(server: &MockServer, oids: &[&str]) {
    let workers: Vec<Value> = oids.iter().map(|oid| worker(oid)).collect();
    Mock::given(method("GET"))
        .and(path(WORKERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "workers": workers })))
        .expect(1)
        .mount(server)
        .await;
}

pub fn profile_path(oid: &str) -> String {
    format!("/payroll/v1/workers/{oid}/us-tax-profiles")
}

pub fn state_path(oid: &str, profile_id: &str) -> String {
    format!("/payroll/v1/workers/{oid}/us-tax-profiles/{profile_id}/state")
}

pub fn profile_body(profile_id: &str, localities: &[&str]) -> Value {
    let locals: Vec<Value> = localities
        .iter()
        .map(|code| {
            json!({
                "itemID": format!("{profile_id}-{code}"),
                "localIncomeTaxInstruction": { "localityCode": { "codeValue": code } }
            })
        })
        .collect();
    json!({
        "usTaxProfiles": {
            "itemID": profile_id,
            "payrollFileNumber": "001234",
            "usLocalTaxInstructions": locals
        }
    })
}

pub async fn mount_profile(server: &MockServer, oid: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(profile_path(oid)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Responder that records when each request reached the server.
#[derive(Clone)]
pub struct ArrivalLog {
    arrivals: Arc<Mutex<Vec<Instant>>>,
    response: ResponseTemplate,
}

impl ArrivalLog {
    pub fn new(response: ResponseTemplate) -> Self {
        Self { arrivals: Arc::new(Mutex::new(Vec::new())), response }
    }

    /// Gaps between consecutive arrivals, in arrival order.
    pub fn gaps(&self) -> Vec<Duration> {
        let mut arrivals = self.arrivals.lock().clone();
        arrivals.sort();
        arrivals.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }

    pub fn count(&self) -> usize {
        self.arrivals.lock().len()
    }
}

impl Respond for ArrivalLog {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals.lock().push(Instant::now());
        self.response.clone()
    }
}

/// Asserts no two arrivals were closer than `interval`, less a little
/// loopback jitter.
pub fn assert_spaced(log: &ArrivalLog, interval: Duration) {
    let floor = interval - Duration::from_millis(15);
    for (i, gap) in log.gaps().into_iter().enumerate() {
        assert!(gap >= floor, "requests {i} and {} were {gap:?} apart", i + 1);
    }
}
