//! HTTP transport
//!
//! The transport only moves bytes: it attaches the bearer token it is
//! given and hands back the raw status and body. Status classification
//! belongs to [`crate::gateway::ApiGateway`].

use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::Client;
use serde::Serialize;

use crate::{ClientConfig, ClientResult};

/// A request relative to the API prefix
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path, e.g. `/clubs/3/members`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Bearer token; `None` sends no `Authorization` header
    pub token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            token: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as the JSON payload
    pub fn with_json<B: Serialize + ?Sized>(self, body: &B) -> ClientResult<Self> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// Status and body of a received response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP transport trait
///
/// `Err` means no response was received (connection refused, timeout...).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse>;
}

/// Network transport backed by reqwest
#[derive(Debug, Clone)]
pub struct NetworkTransport {
    client: Client,
    config: ClientConfig,
}

impl NetworkTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl HttpTransport for NetworkTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        let url = self.config.endpoint_url(&request.path);
        let mut req = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = &request.token {
            req = req.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
