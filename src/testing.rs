//! Canned HTTP transport for exercising the SDK clients without a network.

use aws_smithy_runtime_api::{
    client::{
        http::{
            HttpClient, HttpConnector, HttpConnectorFuture, HttpConnectorSettings,
            SharedHttpConnector,
        },
        orchestrator::{HttpRequest, HttpResponse},
        runtime_components::RuntimeComponents,
    },
    http::StatusCode,
};
use aws_smithy_types::body::SdkBody;
use std::sync;

/// build a service client whose requests all go to a canned transport
macro_rules! canned_client {
    ($sdk:ident, $http:expr) => {{
        let config = $sdk::Config::builder()
            .behavior_version($sdk::config::BehaviorVersion::latest())
            .region($sdk::config::Region::new("eu-west-1"))
            .credentials_provider($sdk::config::Credentials::new(
                "akid", "secret", None, None, "canned",
            ))
            .retry_config($sdk::config::retry::RetryConfig::disabled())
            .http_client($http.clone())
            .build();
        $sdk::Client::from_conf(config)
    }};
}

pub(crate) use canned_client;

/// A request as it left the SDK.
#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) method: String,
    pub(crate) uri: String,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Answers every request with the same response and records what was sent.
#[derive(Clone, Debug)]
pub(crate) struct CannedHttpClient {
    body: String,
    headers: Vec<(&'static str, String)>,
    requests: sync::Arc<sync::Mutex<Vec<RecordedRequest>>>,
    status: u16,
}

impl CannedHttpClient {
    pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            headers: Vec::new(),
            requests: sync::Arc::default(),
            status,
        }
    }

    /// JSON protocol response, as spoken by DynamoDB and SQS.
    pub(crate) fn json(status: u16, body: serde_json::Value) -> Self {
        Self::new(status, body.to_string())
            .with_header("content-type", "application/x-amz-json-1.0")
    }

    pub(crate) fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpConnector for CannedHttpClient {
    fn call(&self, request: HttpRequest) -> HttpConnectorFuture {
        let recorded = RecordedRequest {
            body: request.body().bytes().unwrap_or_default().to_vec(),
            headers: request
                .headers()
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            method: request.method().to_string(),
            uri: request.uri().to_string(),
        };
        self.requests.lock().unwrap().push(recorded);
        let status = StatusCode::try_from(self.status).unwrap();
        let mut response = HttpResponse::new(status, SdkBody::from(self.body.clone()));
        for (name, value) in &self.headers {
            response.headers_mut().insert(*name, value.clone());
        }
        HttpConnectorFuture::ready(Ok(response))
    }
}

impl HttpClient for CannedHttpClient {
    fn http_connector(
        &self,
        _: &HttpConnectorSettings,
        _: &RuntimeComponents,
    ) -> SharedHttpConnector {
        SharedHttpConnector::new(self.clone())
    }
}
