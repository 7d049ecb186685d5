//! Modrinth version listings
//!
//! `GET {base}/v2/project/{id}/version` filtered by game version and loader.
//! Modrinth returns versions newest first; each version's first file is its
//! candidate. A newest version with no files is an error.

use super::{ArtifactProvider, Candidate, ProviderError, ProviderFuture, fetch_json};
use crate::networking::{ContentHash, NetworkProvider};
use crate::pack::LoaderContext;
use crate::primitives::ProviderKind;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.modrinth.com";

/// File hashes reported by Modrinth
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileHashes {
    #[serde(default)]
    pub sha1: Option<String>,
}

/// Version file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionFile {
    pub filename: String,
    pub url: String,
    #[serde(default)]
    pub hashes: FileHashes,
    #[serde(default)]
    pub size: u64,
}

/// Version record (only the fields resolution needs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

/// Modrinth client
pub struct ModrinthClient {
    network: Arc<dyn NetworkProvider>,
    base_url: String,
}

impl ModrinthClient {
    pub fn new(network: Arc<dyn NetworkProvider>) -> Self {
        Self::with_base_url(network, DEFAULT_BASE_URL.to_string())
    }

    /// Create client with custom base URL (for mirrors/testing)
    pub fn with_base_url(network: Arc<dyn NetworkProvider>, base_url: String) -> Self {
        Self {
            network,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Version listing URL for a project under a loader context
    pub fn versions_url(&self, project_id: &str, context: &LoaderContext) -> String {
        let game_versions = format!("[\"{}\"]", context.game_version);
        let loaders = format!("[\"{}\"]", context.loader);
        format!(
            "{}/v2/project/{}/version?game_versions={}&loaders={}",
            self.base_url,
            utf8_percent_encode(project_id, NON_ALPHANUMERIC),
            utf8_percent_encode(&game_versions, NON_ALPHANUMERIC),
            utf8_percent_encode(&loaders, NON_ALPHANUMERIC),
        )
    }

    /// Raw version records for a project
    pub async fn versions(
        &self,
        project_id: &str,
        context: &LoaderContext,
    ) -> Result<Vec<Version>, ProviderError> {
        info!(project_id, %context, "modrinth api request");
        let url = self.versions_url(project_id, context);
        fetch_json(self.network.as_ref(), ProviderKind::Modrinth, &url, &[]).await
    }

    async fn candidates(
        &self,
        project_id: &str,
        context: &LoaderContext,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let versions = self.versions(project_id, context).await?;

        let mut candidates = Vec::with_capacity(versions.len());
        for (index, version) in versions.into_iter().enumerate() {
            let Some(file) = version.files.into_iter().next() else {
                if index == 0 {
                    return Err(ProviderError::NoDownload {
                        provider: ProviderKind::Modrinth,
                        project_id: project_id.to_string(),
                        file_id: version.id,
                    });
                }
                warn!(project_id, version_id = %version.id, "older version has no files, omitting");
                continue;
            };
            candidates.push(Candidate {
                kind: ProviderKind::Modrinth,
                provider_id: Some(version.id),
                url: file.url,
                filename: file.filename,
                hash: file.hashes.sha1.map(ContentHash::sha1),
                size: Some(file.size),
                companion_url: None,
            });
        }
        Ok(candidates)
    }
}

impl ArtifactProvider for ModrinthClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Modrinth
    }

    fn resolve<'a>(
        &'a self,
        identifier: &'a str,
        context: &'a LoaderContext,
    ) -> ProviderFuture<'a> {
        Box::pin(self.candidates(identifier, context))
    }
}

#[cfg(test)]
mod tests {
    include!("modrinth.test.rs");
}
