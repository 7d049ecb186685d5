//! Modrinth pack index (`modrinth.index.json`)

use super::{ManifestError, write_file};
use crate::networking::HashAlgorithm;
use crate::pack::{PackSpec, ResolvedArtifact, ResolvedSet};
use crate::primitives::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const INDEX_FILE: &str = "modrinth.index.json";

const FORMAT_VERSION: u32 = 1;
const GAME: &str = "minecraft";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModrinthIndex {
    pub format_version: u32,
    pub game: String,
    pub version_id: String,
    pub name: String,
    pub summary: String,
    pub files: Vec<IndexFile>,
    pub dependencies: IndexDependencies,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFile {
    pub path: String,
    pub hashes: IndexHashes,
    pub downloads: Vec<String>,
    /// Zero when the provider does not report a size
    pub file_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexHashes {
    /// Empty when unknown
    pub sha1: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDependencies {
    pub minecraft: String,
    #[serde(rename = "fabric-loader")]
    pub fabric_loader: String,
}

impl ModrinthIndex {
    /// Whether references of this kind belong in the index
    ///
    /// GitHub release assets have no mapping in the index format.
    pub fn includes(kind: ProviderKind) -> bool {
        kind != ProviderKind::Github
    }

    pub fn build(spec: &PackSpec, set: &ResolvedSet) -> Self {
        let files = set
            .iter()
            .filter(|artifact| Self::includes(artifact.kind))
            .map(IndexFile::from)
            .collect();

        Self {
            format_version: FORMAT_VERSION,
            game: GAME.to_string(),
            version_id: spec.version.clone(),
            name: spec.name.clone(),
            summary: spec.summary.clone(),
            files,
            dependencies: IndexDependencies {
                minecraft: spec.game_version.clone(),
                fabric_loader: spec.loader_version.clone(),
            },
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), ManifestError> {
        let json = serde_json::to_string_pretty(self)?;
        write_file(path, json)?;
        info!(files = self.files.len(), path = %path.display(), "modrinth index written");
        Ok(())
    }
}

impl From<&ResolvedArtifact> for IndexFile {
    fn from(artifact: &ResolvedArtifact) -> Self {
        let sha1 = artifact
            .hash
            .as_ref()
            .filter(|hash| hash.algorithm == HashAlgorithm::Sha1)
            .map(|hash| hash.value.clone())
            .unwrap_or_default();

        Self {
            path: artifact.destination.clone(),
            hashes: IndexHashes { sha1 },
            downloads: vec![artifact.url.clone()],
            file_size: artifact.size.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    include!("modrinth_index.test.rs");
}
