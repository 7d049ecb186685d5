//! Recording in-memory network provider

use crate::networking::{NetworkFuture, NetworkProvider, NetworkingError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
enum MockRoute {
    Body(Vec<u8>),
    Status(u16),
}

/// One request seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Serves canned bodies keyed by exact URL and records every request
///
/// Unknown URLs answer 404 so a missing route shows up as a transport
/// failure rather than an empty body.
#[derive(Debug, Default)]
pub struct MockNetworkProvider {
    routes: Mutex<HashMap<String, MockRoute>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockNetworkProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`
    pub fn with_body(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        lock(&self.routes).insert(url.into(), MockRoute::Body(body.into()));
        self
    }

    /// Serve a JSON document for `url`
    pub fn with_json(self, url: impl Into<String>, value: &serde_json::Value) -> Self {
        let body = value.to_string();
        self.with_body(url, body)
    }

    /// Answer `url` with a non-success status
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        lock(&self.routes).insert(url.into(), MockRoute::Status(status));
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).iter().map(|r| r.url.clone()).collect()
    }

    /// Full request log, headers included
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// How many times `url` was requested
    pub fn request_count(&self, url: &str) -> usize {
        lock(&self.requests).iter().filter(|r| r.url == url).count()
    }

    /// Forget recorded requests, keeping routes
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }
}

impl NetworkProvider for MockNetworkProvider {
    fn get_bytes<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(String, String)],
    ) -> NetworkFuture<'a> {
        lock(&self.requests).push(RecordedRequest {
            url: url.to_string(),
            headers: headers.to_vec(),
        });

        let route = lock(&self.routes).get(url).cloned();
        let result = match route {
            Some(MockRoute::Body(body)) => Ok(body),
            Some(MockRoute::Status(status)) => Err(NetworkingError::HttpStatus {
                url: url.to_string(),
                status,
            }),
            None => Err(NetworkingError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        };

        Box::pin(async move { result })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_routes_and_records() {
        let mock = MockNetworkProvider::new().with_body("https://a.test/x", "hello");

        let body = mock.get_bytes("https://a.test/x", &[]).await.unwrap();
        assert_eq!(body, b"hello");

        let err = mock.get_bytes("https://a.test/missing", &[]).await.unwrap_err();
        assert!(matches!(err, NetworkingError::HttpStatus { status: 404, .. }));

        assert_eq!(
            mock.requests(),
            vec!["https://a.test/x".to_string(), "https://a.test/missing".to_string()]
        );
        assert_eq!(mock.request_count("https://a.test/x"), 1);

        mock.clear_requests();
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_records_headers() {
        let mock = MockNetworkProvider::new().with_status("https://a.test/down", 503);
        let headers = vec![("x-api-key".to_string(), "k".to_string())];

        let err = mock.get_bytes("https://a.test/down", &headers).await.unwrap_err();
        assert!(matches!(err, NetworkingError::HttpStatus { status: 503, .. }));
        assert_eq!(mock.recorded()[0].headers, headers);
    }
}
