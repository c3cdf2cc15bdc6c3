//! HTTP client abstraction for testability

use std::fmt;
use std::time::Duration;
use tracing::{trace, warn};

/// Browser-like User-Agent sent with every tile request.
/// Some tile servers (e.g., Google) reject requests without one.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a failed request is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network hiccup, server error or truncated body
    Transient,
    /// The request itself is broken; repeating it cannot help
    Fatal,
}

/// Errors returned by [`HttpClient`] implementations.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Connection, DNS or timeout failure
    Transport(String),
    /// Server answered with a non-success status
    Status { url: String, status: u16 },
    /// Response body could not be read
    Body(String),
    /// Request could not be constructed (bad URL, bad header)
    Client(String),
}

impl HttpError {
    pub fn kind(&self) -> FailureKind {
        match self {
            HttpError::Transport(_) | HttpError::Status { .. } | HttpError::Body(_) => {
                FailureKind::Transient
            }
            HttpError::Client(_) => FailureKind::Fatal,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Transport(msg) => write!(f, "Request failed: {}", msg),
            HttpError::Status { url, status } => write!(f, "HTTP {} from {}", status, url),
            HttpError::Body(msg) => write!(f, "Failed to read response: {}", msg),
            HttpError::Client(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for synchronous HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests. Implementations are shared by
/// all fetch workers, hence `Send + Sync`.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request with custom headers.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    /// * `headers` - Slice of (header_name, header_value) tuples
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get_with_headers(&self, url: &str, headers: &[(&str, &str)])
        -> Result<Vec<u8>, HttpError>;

    /// Performs an HTTP GET request.
    fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        self.get_with_headers(url, &[])
    }
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .map_err(|e| HttpError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, HttpError> {
        trace!(url = url, "HTTP GET request starting");

        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().map_err(|e| {
            warn!(
                url = url,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "HTTP request failed"
            );
            if e.is_builder() {
                HttpError::Client(e.to_string())
            } else {
                HttpError::Transport(e.to_string())
            }
        })?;

        // Check HTTP status
        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(HttpError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        // Read response body
        let bytes = response
            .bytes()
            .map_err(|e| HttpError::Body(e.to_string()))?;
        trace!(url = url, bytes = bytes.len(), "HTTP response body read");
        Ok(bytes.to_vec())
    }
}
