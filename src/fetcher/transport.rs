//! HTTP transport
//!
//! A transport performs exactly one GET. Retry decisions live in the page
//! fetcher, which only needs to know whether a failure was an HTTP 429.

use crate::config::FetcherConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// A single failed GET
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status, when the server answered at all
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// True for HTTP 429 Too Many Requests
    pub fn is_rate_limited(&self) -> bool {
        self.status == Some(StatusCode::TOO_MANY_REQUESTS.as_u16())
    }
}

/// One GET request returning the body as text
///
/// `Ok(None)` means the server explicitly sent no content.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Option<String>, TransportError>;
}

/// Builds an HTTP client with proper configuration
///
/// No request timeout is set; the archive can be slow and the crawl has no
/// deadline.
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Transport backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<Option<String>, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::status(
                status.as_u16(),
                format!("Request failed with status code {}", status.as_u16()),
            ));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        // A body that fails mid-stream or cannot be decoded is an error, never
        // partial content
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::network(e.to_string()))?;

        if body.is_empty() {
            Ok(None)
        } else {
            Ok(Some(body))
        }
    }
}
