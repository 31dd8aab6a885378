//! Outbound HTTP transport.
//!
//! # Responsibilities
//! - Execute one request against an absolute URL
//! - Report status and body, or a network-level failure
//!
//! # Design Decisions
//! - Object-safe trait so stubs can replace the network in tests
//! - `ReqwestTransport` shares one pooled client; timeouts come from config

use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use url::Url;

use crate::config::TimeoutConfig;
use crate::error::TransportError;

/// Request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Serialized JSON payload.
    pub body: Option<Vec<u8>>,
}

/// Response returned by a [`Transport`].
#[derive(Debug, Clone)]
pub struct InboundResponse {
    pub status: StatusCode,
    pub body: String,
}

impl InboundResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes HTTP exchanges on behalf of the dispatcher.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: OutboundRequest,
    ) -> BoxFuture<'_, Result<InboundResponse, TransportError>>;
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an already configured client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client with the configured timeouts.
    pub fn from_config(timeouts: &TimeoutConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .pool_idle_timeout(Duration::from_secs(timeouts.pool_idle_secs))
            .build()
            .map_err(|e| TransportError::with_source("failed to build HTTP client", e))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn execute(
        &self,
        request: OutboundRequest,
    ) -> BoxFuture<'_, Result<InboundResponse, TransportError>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, request.url)
                .headers(request.headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;

            Ok(InboundResponse { status, body })
        })
    }
}
