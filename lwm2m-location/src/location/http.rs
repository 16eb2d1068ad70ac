//! HTTP client abstraction for testability.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::error::{FetchError, ResourceError};

/// Default User-Agent string for requests to the data source.
const DEFAULT_USER_AGENT: &str = concat!("lwm2m-location/", env!("CARGO_PKG_VERSION"));

/// Trait for asynchronous HTTP GET.
///
/// This abstraction allows the location source to be tested against a
/// mock client instead of a live endpoint.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes, or an error for transport failures and
    /// non-success status codes.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new client with the given request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ResourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| ResourceError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(FetchError::Http(format!("Request failed: {}", e)));
            }
        };

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Http(format!("Failed to read response: {}", e)))
    }
}

/// Mock HTTP client for tests.
///
/// Returns the same canned response for every request and counts calls.
#[cfg(test)]
pub(crate) struct MockHttpClient {
    pub response: Result<Vec<u8>, FetchError>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn with_body(body: &str) -> Self {
        Self {
            response: Ok(body.as_bytes().to_vec()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn with_error(error: FetchError) -> Self {
        Self {
            response: Err(error),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl AsyncHttpClient for MockHttpClient {
    async fn get(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.response.clone()
    }
}
