//! HTTP transport abstraction
//!
//! The request engine only needs "send these bytes, give me a status and a
//! body". Keeping that behind a trait lets tests and embedders swap the
//! network out without touching URL building or status handling.

use async_trait::async_trait;
use reqwest::{Method, Url};

use crate::error::TransportError;

/// Fully built HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Value of the first header with this name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can carry an [`HttpRequest`] to the server
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Production transport backed by `reqwest`
///
/// Uses the transport's default timeouts; requests are never retried.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
