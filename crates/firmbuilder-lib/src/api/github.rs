//! GitHub release assets
//!
//! Lists a repository's releases, takes the most recent one and picks among
//! its assets. Names containing a build-artifact marker are skipped, a name
//! containing `multimc` is the companion installer package, and the last
//! remaining asset is the primary artifact.

use super::{ArtifactProvider, Candidate, ProviderError, ProviderFuture, fetch_json};
use crate::networking::{ContentHash, Fetcher, HashAlgorithm, NetworkProvider};
use crate::pack::{LoaderContext, filename_from_url};
use crate::primitives::ProviderKind;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Asset name fragments marking non-distributable build outputs
pub const EXCLUDED_MARKERS: [&str; 6] = ["dev", "api", "sources", "patch", "debug", "agent"];

/// Asset name fragment marking the companion installer package
pub const COMPANION_MARKER: &str = "multimc";

/// Release record (only the assets link is used)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    pub assets_url: String,
}

/// Release asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
}

/// Outcome of asset selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSelection {
    pub primary: Option<Asset>,
    pub companion: Option<Asset>,
}

/// Whether an asset name carries one of the excluded markers
pub fn is_excluded(name: &str) -> bool {
    let lower = name.to_lowercase();
    EXCLUDED_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Pick the primary and companion assets; later assets replace earlier ones
pub fn select_assets(assets: &[Asset]) -> AssetSelection {
    let mut selection = AssetSelection::default();

    for asset in assets {
        if is_excluded(&asset.name) {
            debug!(asset = %asset.name, "skipping excluded asset");
            continue;
        }
        if asset.name.to_lowercase().contains(COMPANION_MARKER) {
            selection.companion = Some(asset.clone());
            continue;
        }
        selection.primary = Some(asset.clone());
    }

    selection
}

/// GitHub releases client
pub struct GithubClient {
    network: Arc<dyn NetworkProvider>,
    base_url: String,
    hashing: Option<Arc<Fetcher>>,
}

impl GithubClient {
    pub fn new(network: Arc<dyn NetworkProvider>) -> Self {
        Self::with_base_url(network, DEFAULT_BASE_URL.to_string())
    }

    /// Create client with custom base URL (for testing)
    pub fn with_base_url(network: Arc<dyn NetworkProvider>, base_url: String) -> Self {
        Self {
            network,
            base_url: base_url.trim_end_matches('/').to_string(),
            hashing: None,
        }
    }

    /// Stage the primary asset during resolution and record its MD5
    pub fn with_hashing(mut self, fetcher: Arc<Fetcher>) -> Self {
        self.hashing = Some(fetcher);
        self
    }

    pub fn releases_url(&self, repository: &str) -> String {
        format!("{}/repos/{}/releases", self.base_url, repository)
    }

    fn headers() -> Vec<(String, String)> {
        vec![(
            "accept".to_string(),
            "application/vnd.github+json".to_string(),
        )]
    }

    async fn candidates(&self, repository: &str) -> Result<Vec<Candidate>, ProviderError> {
        info!(repository, "github api request");
        let headers = Self::headers();

        let releases: Vec<Release> = fetch_json(
            self.network.as_ref(),
            ProviderKind::Github,
            &self.releases_url(repository),
            &headers,
        )
        .await?;

        let Some(latest) = releases.first() else {
            warn!(repository, "repository has no releases");
            return Ok(Vec::new());
        };

        let assets: Vec<Asset> = fetch_json(
            self.network.as_ref(),
            ProviderKind::Github,
            &latest.assets_url,
            &headers,
        )
        .await?;

        let selection = select_assets(&assets);
        let Some(primary) = selection.primary else {
            warn!(repository, "latest release has no usable asset");
            return Ok(Vec::new());
        };

        let url = primary.browser_download_url;
        let filename = filename_from_url(&url).ok_or_else(|| ProviderError::InvalidUrl {
            url: url.clone(),
        })?;

        let mut candidate = Candidate::new(ProviderKind::Github, url, filename);
        candidate.companion_url = selection.companion.map(|asset| asset.browser_download_url);

        if let Some(fetcher) = &self.hashing {
            let staged = fetcher
                .stage(&candidate.url, &candidate.filename, None)
                .await?;
            let digest = Fetcher::hash_file(&staged, HashAlgorithm::Md5)?;
            info!(file = %staged.display(), md5 = %digest, "hashed release asset");
            candidate.hash = Some(ContentHash::md5(digest));
        }

        Ok(vec![candidate])
    }
}

impl ArtifactProvider for GithubClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Github
    }

    fn resolve<'a>(
        &'a self,
        identifier: &'a str,
        _context: &'a LoaderContext,
    ) -> ProviderFuture<'a> {
        Box::pin(self.candidates(identifier))
    }
}

#[cfg(test)]
mod tests {
    include!("github.test.rs");
}
