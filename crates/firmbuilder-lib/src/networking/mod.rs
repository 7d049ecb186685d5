//! HTTP transport for catalog queries and artifact downloads
//!
//! Everything that touches the network goes through [`NetworkProvider`], so
//! provider clients and the fetcher can be driven by a recording mock in
//! tests. [`NetworkingManager`] is the reqwest-backed implementation.

use reqwest::Client;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

pub mod fetcher;

pub use fetcher::{ContentHash, FetchError, FetchOutcome, Fetcher, HashAlgorithm};

/// Networking errors for catalog queries and downloads
#[derive(Debug, Error)]
pub enum NetworkingError {
    #[error("HTTP request failed: {source}")]
    RequestFailed {
        #[from]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid request header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

/// Networking configuration
#[derive(Debug, Clone)]
pub struct NetworkingConfig {
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout_seconds: Option<u64>,
}

impl Default for NetworkingConfig {
    fn default() -> Self {
        Self {
            user_agent: crate::application::config::defaults::USER_AGENT.to_string(),
            timeout_seconds: None,
        }
    }
}

/// Boxed future returned by [`NetworkProvider`] methods
pub type NetworkFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<u8>, NetworkingError>> + Send + 'a>>;

/// Byte-level HTTP GET abstraction
///
/// Object-safe so it can be shared as `Arc<dyn NetworkProvider>` between the
/// provider clients and the fetcher.
pub trait NetworkProvider: Send + Sync {
    /// GET `url` with extra request headers, returning the body of a 2xx response
    fn get_bytes<'a>(&'a self, url: &'a str, headers: &'a [(String, String)])
    -> NetworkFuture<'a>;
}

/// Networking manager backed by a shared reqwest client
pub struct NetworkingManager {
    client: Client,
    config: NetworkingConfig,
}

impl NetworkingManager {
    /// Build the HTTP client from configuration
    pub fn new(config: NetworkingConfig) -> Result<Self, NetworkingError> {
        trace!("Initializing networking manager");

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Active configuration
    pub fn config(&self) -> &NetworkingConfig {
        &self.config
    }

    /// Get HTTP client for manual requests
    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn fetch(&self, url: &str, headers: &[(String, String)]) -> Result<Vec<u8>, NetworkingError> {
        debug!(url, "GET");

        let mut request = self.client.get(url);
        for (name, value) in headers {
            let header_value = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
                NetworkingError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            request = request.header(name.as_str(), header_value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkingError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        trace!(url, bytes = bytes.len(), "response received");
        Ok(bytes.to_vec())
    }
}

impl NetworkProvider for NetworkingManager {
    fn get_bytes<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(String, String)],
    ) -> NetworkFuture<'a> {
        Box::pin(self.fetch(url, headers))
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
