//! CurseForge-compatible file listings
//!
//! `GET {base}/v1/mods/{id}/files?gameVersion=..&modLoaderType=..`. The default
//! base is a keyless proxy; the official API needs `x-api-key`, which is sent
//! when configured.

use super::{ArtifactProvider, Candidate, ProviderError, ProviderFuture, fetch_json};
use crate::networking::{ContentHash, NetworkProvider};
use crate::pack::LoaderContext;
use crate::primitives::ProviderKind;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "http://api-pocket.com";

/// Hash algorithm tag for SHA-1 in CurseForge file records
pub const ALGO_SHA1: u8 = 1;
/// Hash algorithm tag for MD5 in CurseForge file records
pub const ALGO_MD5: u8 = 2;

/// File hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileHash {
    pub value: String,
    pub algo: u8,
}

/// File information (only the fields resolution needs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: u64,
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Null for files whose authors disabled third-party downloads
    #[serde(rename = "downloadUrl", default)]
    pub download_url: Option<String>,
    #[serde(rename = "fileLength", default)]
    pub file_length: u64,
    #[serde(default)]
    pub hashes: Vec<FileHash>,
}

impl FileInfo {
    /// The SHA-1 entry, ignoring any other algorithm
    pub fn sha1(&self) -> Option<&str> {
        self.hashes
            .iter()
            .find(|hash| hash.algo == ALGO_SHA1)
            .map(|hash| hash.value.as_str())
    }
}

/// Files response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesResponse {
    #[serde(default)]
    pub data: Vec<FileInfo>,
}

/// CurseForge client
pub struct CurseForgeClient {
    network: Arc<dyn NetworkProvider>,
    base_url: String,
    api_key: Option<String>,
}

impl CurseForgeClient {
    pub fn new(network: Arc<dyn NetworkProvider>) -> Self {
        Self::with_base_url(network, DEFAULT_BASE_URL.to_string(), None)
    }

    /// Create client with custom base URL and optional API key
    pub fn with_base_url(
        network: Arc<dyn NetworkProvider>,
        base_url: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            network,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// File listing URL for a project under a loader context
    pub fn files_url(&self, project_id: &str, context: &LoaderContext) -> String {
        format!(
            "{}/v1/mods/{}/files?gameVersion={}&modLoaderType={}",
            self.base_url,
            utf8_percent_encode(project_id, NON_ALPHANUMERIC),
            utf8_percent_encode(&context.game_version, NON_ALPHANUMERIC),
            utf8_percent_encode(&context.loader, NON_ALPHANUMERIC),
        )
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(key) = &self.api_key {
            headers.push(("x-api-key".to_string(), key.clone()));
        }
        headers
    }

    /// Raw file records for a project
    pub async fn files(
        &self,
        project_id: &str,
        context: &LoaderContext,
    ) -> Result<Vec<FileInfo>, ProviderError> {
        info!(project_id, %context, "curseforge api request");
        let url = self.files_url(project_id, context);
        let response: FilesResponse = fetch_json(
            self.network.as_ref(),
            ProviderKind::CurseForge,
            &url,
            &self.headers(),
        )
        .await?;
        Ok(response.data)
    }

    async fn candidates(
        &self,
        project_id: &str,
        context: &LoaderContext,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let files = self.files(project_id, context).await?;

        let mut candidates = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            let hash = file.sha1().map(ContentHash::sha1);
            let Some(url) = file.download_url else {
                // The newest file is the one a build records, so it must be downloadable
                if index == 0 {
                    return Err(ProviderError::NoDownload {
                        provider: ProviderKind::CurseForge,
                        project_id: project_id.to_string(),
                        file_id: file.id.to_string(),
                    });
                }
                warn!(project_id, file_id = file.id, "older file has no download URL, omitting");
                continue;
            };
            candidates.push(Candidate {
                kind: ProviderKind::CurseForge,
                provider_id: Some(file.id.to_string()),
                url,
                filename: file.file_name,
                hash,
                size: Some(file.file_length),
                companion_url: None,
            });
        }
        Ok(candidates)
    }
}

impl ArtifactProvider for CurseForgeClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::CurseForge
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
    include!("curseforge.test.rs");
}
