//! # Provider clients
//!
//! Every provider kind turns `(identifier, loader context)` into a list of
//! candidate artifacts, newest first. The pipeline never branches on the
//! provider kind itself; it asks the [`ProviderRegistry`] for the client.
//!
//! ## Modules
//!
//! - [`modrinth`] - Modrinth version listings
//! - [`curseforge`] - CurseForge-compatible file listings
//! - [`github`] - GitHub release assets
//! - [`direct`] - Raw download URLs

pub mod curseforge;
pub mod direct;
pub mod github;
pub mod modrinth;

pub use curseforge::CurseForgeClient;
pub use direct::DirectUrlClient;
pub use github::GithubClient;
pub use modrinth::ModrinthClient;

use crate::networking::{ContentHash, FetchError, Fetcher, NetworkProvider, NetworkingError};
use crate::pack::LoaderContext;
use crate::primitives::ProviderKind;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Provider client errors
///
/// All of these abort the build. "Not found" is not an error: it is an
/// empty candidate list.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Network {
        provider: ProviderKind,
        source: NetworkingError,
    },

    #[error("Malformed {provider} response from {url}: {source}")]
    MalformedResponse {
        provider: ProviderKind,
        url: String,
        source: serde_json::Error,
    },

    #[error("Cannot derive a filename from URL '{url}'")]
    InvalidUrl { url: String },

    #[error("Failed to hash release asset: {source}")]
    Hashing {
        #[from]
        source: FetchError,
    },

    #[error("Newest {provider} file {file_id} for '{project_id}' has no download")]
    NoDownload {
        provider: ProviderKind,
        project_id: String,
        file_id: String,
    },

    #[error("No client registered for provider '{provider}'")]
    Unsupported { provider: ProviderKind },
}

/// One downloadable file offered by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: ProviderKind,
    /// Modrinth version id or CurseForge file id
    pub provider_id: Option<String>,
    pub url: String,
    pub filename: String,
    pub hash: Option<ContentHash>,
    pub size: Option<u64>,
    /// Companion installer package published next to a GitHub release asset
    pub companion_url: Option<String>,
}

impl Candidate {
    /// Candidate with only a location; hash, size and ids unset
    pub fn new(kind: ProviderKind, url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            kind,
            provider_id: None,
            url: url.into(),
            filename: filename.into(),
            hash: None,
            size: None,
            companion_url: None,
        }
    }
}

/// Boxed future returned by [`ArtifactProvider::resolve`]
pub type ProviderFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<Candidate>, ProviderError>> + Send + 'a>>;

/// Capability shared by every provider kind
pub trait ArtifactProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Candidates for `identifier` under `context`, newest first
    fn resolve<'a>(&'a self, identifier: &'a str, context: &'a LoaderContext)
    -> ProviderFuture<'a>;
}

/// API roots and credentials for the catalog providers
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub modrinth: String,
    pub curseforge: String,
    pub github: String,
    pub curseforge_api_key: Option<String>,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            modrinth: modrinth::DEFAULT_BASE_URL.to_string(),
            curseforge: curseforge::DEFAULT_BASE_URL.to_string(),
            github: github::DEFAULT_BASE_URL.to_string(),
            curseforge_api_key: None,
        }
    }
}

/// Dispatch table from provider kind to client
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Box<dyn ArtifactProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard clients for all four kinds
    ///
    /// `github_hashing` enables downloading GitHub assets during resolution
    /// so an MD5 can be recorded.
    pub fn standard(
        network: Arc<dyn NetworkProvider>,
        endpoints: &ProviderEndpoints,
        github_hashing: Option<Arc<Fetcher>>,
    ) -> Self {
        let mut github = GithubClient::with_base_url(network.clone(), endpoints.github.clone());
        if let Some(fetcher) = github_hashing {
            github = github.with_hashing(fetcher);
        }

        Self::new()
            .with_provider(Box::new(ModrinthClient::with_base_url(
                network.clone(),
                endpoints.modrinth.clone(),
            )))
            .with_provider(Box::new(CurseForgeClient::with_base_url(
                network,
                endpoints.curseforge.clone(),
                endpoints.curseforge_api_key.clone(),
            )))
            .with_provider(Box::new(github))
            .with_provider(Box::new(DirectUrlClient))
    }

    /// Register a client, replacing any previous client of the same kind
    pub fn with_provider(mut self, provider: Box<dyn ArtifactProvider>) -> Self {
        self.providers.insert(provider.kind(), provider);
        self
    }

    pub fn get(&self, kind: ProviderKind) -> Result<&dyn ArtifactProvider, ProviderError> {
        self.providers
            .get(&kind)
            .map(|provider| provider.as_ref())
            .ok_or(ProviderError::Unsupported { provider: kind })
    }

    /// Resolve through the client registered for `kind`
    pub async fn resolve(
        &self,
        kind: ProviderKind,
        identifier: &str,
        context: &LoaderContext,
    ) -> Result<Vec<Candidate>, ProviderError> {
        self.get(kind)?.resolve(identifier, context).await
    }
}

/// GET and decode a JSON document for a provider
pub(crate) async fn fetch_json<T: serde::de::DeserializeOwned>(
    network: &dyn NetworkProvider,
    provider: ProviderKind,
    url: &str,
    headers: &[(String, String)],
) -> Result<T, ProviderError> {
    let body = network
        .get_bytes(url, headers)
        .await
        .map_err(|source| ProviderError::Network { provider, source })?;

    serde_json::from_slice(&body).map_err(|source| ProviderError::MalformedResponse {
        provider,
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
