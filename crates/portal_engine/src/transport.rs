use std::time::Duration;

use portal_logging::{portal_debug, portal_trace};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ApiError, FailureKind};

#[derive(Debug, Clone, PartialEq)]
pub struct TransportSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer_token: Option<String>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/graphql".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            bearer_token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    #[serde(rename = "operationName")]
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorBody {
    message: String,
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Runs one operation and returns the response's `data` object.
    async fn execute(&self, request: &GraphqlRequest) -> Result<Value, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    endpoint: reqwest::Url,
    bearer_token: Option<String>,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: TransportSettings) -> Result<Self, ApiError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| ApiError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            endpoint,
            bearer_token: settings.bearer_token,
            client,
        })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &GraphqlRequest) -> Result<Value, ApiError> {
        let body = serde_json::to_vec(request)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        portal_debug!("POST {} operation={}", self.endpoint, request.operation_name);
        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        portal_trace!("Response status={} bytes={}", status, bytes.len());

        // GraphQL servers report resolver errors in the body, sometimes with
        // a non-2xx status; prefer the body's message when there is one.
        let envelope: ResponseEnvelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => {
                return Err(ApiError::new(FailureKind::Decode, err.to_string()));
            }
            Err(_) => {
                return Err(ApiError::new(
                    FailureKind::HttpStatus(status.as_u16()),
                    status.to_string(),
                ));
            }
        };
        if let Some(first) = envelope.errors.into_iter().next() {
            return Err(ApiError::new(FailureKind::GraphQl, first.message));
        }
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        match envelope.data {
            Some(data) if !data.is_null() => Ok(data),
            _ => Err(ApiError::new(
                FailureKind::Decode,
                "response carried no data",
            )),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
