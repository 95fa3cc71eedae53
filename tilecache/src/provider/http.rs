//! HTTP client abstraction for testability

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::types::ProviderError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every tile request.
///
/// Public tile servers (notably openstreetmap.org) reject requests without an
/// identifying User-Agent.
pub const DEFAULT_USER_AGENT: &str = concat!("tilecache/", env!("CARGO_PKG_VERSION"));

/// Trait for async HTTP GET operations.
///
/// This abstraction allows the fetcher to be exercised with a mock client in
/// tests instead of real tile servers.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Returns
    ///
    /// The response body, [`ProviderError::NotFound`] for a 404, or another
    /// [`ProviderError`] describing the failure.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

impl<C: AsyncHttpClient> AsyncHttpClient for Arc<C> {
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send {
        (**self).get(url)
    }
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client with the default timeout and User-Agent.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_options(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    /// Creates a client with a custom timeout and User-Agent.
    pub fn with_options(timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            // Tile batches hit the same few hosts over and over
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(ProviderError::HttpError(format!("Request failed: {}", e)));
            }
        };

        let status = response.status();
        debug!(url = url, status = status.as_u16(), "HTTP response received");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock HTTP client for testing.
    ///
    /// Returns `response` for every request, except that the first
    /// `failures` requests return `failure` instead. Every requested URL is
    /// recorded.
    pub struct MockAsyncHttpClient {
        pub response: Result<Vec<u8>, ProviderError>,
        failure: Option<ProviderError>,
        failures: AtomicUsize,
        delay: Option<Duration>,
        requests: Mutex<Vec<String>>,
    }

    impl MockAsyncHttpClient {
        pub fn new(response: Result<Vec<u8>, ProviderError>) -> Self {
            Self {
                response,
                failure: None,
                failures: AtomicUsize::new(0),
                delay: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Fail the first `count` requests with `error`.
        pub fn failing_first(mut self, count: usize, error: ProviderError) -> Self {
            self.failure = Some(error);
            self.failures = AtomicUsize::new(count);
            self
        }

        /// Sleep before answering each request.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
            self.requests.lock().unwrap().push(url.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let should_fail = self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            match (&self.failure, should_fail) {
                (Some(err), true) => Err(err.clone()),
                _ => self.response.clone(),
            }
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockAsyncHttpClient::new(Ok(vec![1, 2, 3, 4]));

        let result = mock.get("http://example.com").await;
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.requests(), vec!["http://example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockAsyncHttpClient::new(Err(ProviderError::HttpError("Test error".into())));

        let result = mock.get("http://example.com").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_client_failing_first() {
        let mock = MockAsyncHttpClient::new(Ok(vec![7]))
            .failing_first(2, ProviderError::HttpError("flaky".into()));

        assert!(mock.get("u").await.is_err());
        assert!(mock.get("u").await.is_err());
        assert_eq!(mock.get("u").await.unwrap(), vec![7]);
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_arc_client_delegates() {
        let mock = Arc::new(MockAsyncHttpClient::new(Ok(vec![1])));
        let shared = Arc::clone(&mock);

        assert_eq!(shared.get("u").await.unwrap(), vec![1]);
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(AsyncReqwestClient::new().is_ok());
        assert!(AsyncReqwestClient::with_options(5, "test-agent/1.0").is_ok());
    }

    #[test]
    fn test_default_user_agent() {
        assert!(DEFAULT_USER_AGENT.starts_with("tilecache/"));
    }
}
