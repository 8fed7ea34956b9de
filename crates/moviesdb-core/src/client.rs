//! Authenticated HTTP request engine for the TMDB API
//!
//! This module builds URLs and headers for every API call, hands the request
//! to a [`Transport`], and classifies the response: 2xx bodies are decoded
//! into the caller's type, anything else becomes a
//! [`RequestError::BadResponse`] carrying the TMDB error body when one could
//! be decoded. Failures are never retried.

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ConfigError, DecodeError, NetworkError, RequestError, Result};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

/// Base URL for the TMDB v3 API
pub const API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Locale forced on every GET request
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Environment variable holding the bearer token
pub const TOKEN_ENV_VAR: &str = "TMDB_TOKEN";

const ACCEPT: &str = "application/json";
const CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Bearer credential for the TMDB API
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a token value
    ///
    /// # Errors
    /// Returns `ConfigError::MissingToken` if the value is empty
    pub fn new(value: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ConfigError::MissingToken(TOKEN_ENV_VAR));
        }
        Ok(Self(value))
    }

    /// Read the token from `TMDB_TOKEN`, loading a `.env` file first if present
    ///
    /// # Errors
    /// Returns `ConfigError::MissingToken` if the variable is unset or empty
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded environment file");
        }
        let value =
            std::env::var(TOKEN_ENV_VAR).map_err(|_| ConfigError::MissingToken(TOKEN_ENV_VAR))?;
        Self::new(value)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Configuration for the TMDB request engine
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL without a trailing slash (default: TMDB v3)
    pub api_base: String,
    /// Locale appended to GET requests (default: en-US)
    pub language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: API_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Point the engine at another base URL (mock servers, proxies)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

/// Description of one API call, independent of credentials and base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base, starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query-string parameter
    pub fn query(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of the first query parameter with this name
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP request engine for the TMDB API
///
/// Holds only immutable state (credential, configuration, transport handle),
/// so a single instance can be shared by every caller.
#[derive(Clone)]
pub struct TmdbClient {
    transport: Arc<dyn Transport>,
    token: Token,
    config: ClientConfig,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("token", &self.token)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    /// Create a client with default configuration and a reqwest transport
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new(token: Token) -> std::result::Result<Self, ConfigError> {
        Self::with_config(token, ClientConfig::default())
    }

    /// Create a client with custom configuration and a reqwest transport
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(token: Token, config: ClientConfig) -> std::result::Result<Self, ConfigError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(token, config, Arc::new(transport)))
    }

    /// Create a client on top of an injected transport
    pub fn with_transport(token: Token, config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            token,
            config,
        }
    }

    /// Create a client from `TMDB_TOKEN` (and `.env`) with default configuration
    ///
    /// # Errors
    /// - `ConfigError::MissingToken` - No token configured
    /// - `ConfigError::Transport` - HTTP client could not be created
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::new(Token::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a request and deserialize a 2xx body into `T`
    ///
    /// # Errors
    /// - `RequestError::BadUrl` - The request does not form a valid URL
    /// - `RequestError::Transport` - No response was received
    /// - `RequestError::BadResponse` - Status outside 200-299
    /// - `RequestError::Decode` - The 2xx body is not a valid `T`
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        self.execute_with(request, |body| {
            serde_json::from_slice(body).map_err(DecodeError::from)
        })
        .await
    }

    /// Execute a request and decode a 2xx body with `decode`
    ///
    /// Used for media payloads, whose decoding depends on a media type
    /// context that plain deserialization cannot carry.
    pub async fn execute_with<T, F>(&self, request: &ApiRequest, decode: F) -> Result<T>
    where
        F: FnOnce(&[u8]) -> std::result::Result<T, DecodeError>,
    {
        let http_request = self.build_request(request)?;
        debug!(method = %http_request.method, url = %http_request.url, "TMDB request");

        let response = self.transport.send(http_request).await?;

        if !response.is_success() {
            let error = serde_json::from_slice::<NetworkError>(&response.body).ok();
            debug!(status = response.status, error = ?error, "TMDB error response");
            return Err(RequestError::BadResponse {
                status: response.status,
                error,
            });
        }

        decode(&response.body).map_err(|e| {
            debug!(path = %request.path, error = %e, "Failed to decode TMDB response");
            RequestError::Decode(e)
        })
    }

    /// Build the outgoing HTTP request for an API call
    pub fn build_request(&self, request: &ApiRequest) -> Result<HttpRequest> {
        let url = self.build_url(request)?;

        let headers = vec![
            ("Authorization", self.token.bearer()),
            ("Accept", ACCEPT.to_string()),
            ("Content-Type", CONTENT_TYPE.to_string()),
        ];

        Ok(HttpRequest {
            method: request.method.clone(),
            url,
            headers,
            body: request.body.as_ref().map(|body| body.to_string().into_bytes()),
        })
    }

    fn build_url(&self, request: &ApiRequest) -> Result<Url> {
        if !request.path.starts_with('/') {
            return Err(RequestError::BadUrl(format!(
                "path must start with '/': {}",
                request.path
            )));
        }

        let mut pairs: Vec<(&str, &str)> = request
            .query
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        if request.method == Method::GET {
            pairs.push(("language", self.config.language.as_str()));
        }

        let mut url = format!("{}{}", self.config.api_base, request.path);
        if !pairs.is_empty() {
            let query = pairs
                .iter()
                .map(|(name, value)| {
                    format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
                })
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }

        Url::parse(&url).map_err(|e| RequestError::BadUrl(format!("{url}: {e}")))
    }
}
