//! HTTP fetcher implementation
//!
//! This module issues exactly one request per target and classifies the
//! result:
//! - Building the HTTP client with the identifying user agent string
//! - GET requests with redirects disabled, so every 3xx is a final status
//! - Reading the body only for status 200
//! - Classifying transport failures

use crate::config::Config;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why no response could be obtained for a target
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid address: {0}")]
    InvalidUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Other(String),
}

/// Result of a single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A response was received; `body` is empty unless `status` is 200
    Response { status: u16, body: String },

    /// No response could be obtained
    Failure(TransportError),
}

/// Issues one fetch per call and yields a classified outcome
///
/// Implementations must not retry.
pub trait PageFetcher {
    fn fetch(&self, address: &str) -> impl Future<Output = FetchOutcome> + Send;
}

/// Builds an HTTP client with the crawler's identifying header
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header
/// * `timeout` - Upper bound for a whole request
///
/// # Example
///
/// ```no_run
/// use linkwalk::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("linkwalk/1.0", Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the user agent and timeout settings in `config`
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent.header_value(),
            Duration::from_secs(config.crawler.request_timeout),
        )?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> FetchOutcome {
        fetch_url(&self.client, address).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | HTTP 200 | `Response` with body |
/// | Any other status, redirects included | `Response` without body |
/// | Unparseable address | `Failure(InvalidUrl)` |
/// | Timeout | `Failure(Timeout)` |
/// | DNS failure, connection refused, TLS error | `Failure(Connect)` |
/// | Body could not be read | `Failure(Body)` |
pub async fn fetch_url(client: &Client, address: &str) -> FetchOutcome {
    let response = match client.get(address).send().await {
        Ok(response) => response,
        Err(e) => return FetchOutcome::Failure(classify_error(&e)),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchOutcome::Response {
            status: status.as_u16(),
            body: String::new(),
        };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Response {
            status: status.as_u16(),
            body,
        },
        Err(e) => FetchOutcome::Failure(TransportError::Body(e.to_string())),
    }
}

fn classify_error(error: &reqwest::Error) -> TransportError {
    if error.is_builder() {
        TransportError::InvalidUrl(error.to_string())
    } else if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else if error.is_body() || error.is_decode() {
        TransportError::Body(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}
