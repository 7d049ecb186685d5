//! Pack configuration document (`pack.json`)
//!
//! The pack spec is read once at the start of a build and shared read-only
//! for the rest of the run.

use crate::primitives::ProviderKind;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Loader library version pinned in the Modrinth index when the pack omits one
pub const DEFAULT_LOADER_VERSION: &str = "0.14.19";

/// Pack configuration errors
#[derive(Debug, Error)]
pub enum PackSpecError {
    #[error("Failed to read pack file '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse pack file: {source}")]
    ParseFailed {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid pack configuration: {reason}")]
    Invalid { reason: String },
}

/// Top-level pack document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackSpec {
    pub name: String,

    /// Loader identifier such as `forge` or `fabric`
    pub loader: String,

    /// Pack version written into manifests
    pub version: String,

    #[serde(rename = "mcv")]
    pub game_version: String,

    /// Download GitHub release assets during resolution to record an MD5
    #[serde(rename = "hashgit", default)]
    pub hash_github: bool,

    #[serde(rename = "loaderversion", default = "default_loader_version")]
    pub loader_version: String,

    #[serde(default)]
    pub summary: String,

    /// Declaration order is preserved in every manifest
    #[serde(default)]
    pub mods: Vec<ModReference>,
}

/// One declared mod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModReference {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ProviderKind,

    /// Provider identifier; the download URL itself for `url` references
    #[serde(rename = "projectid")]
    pub project_id: String,

    #[serde(
        rename = "fileid",
        default,
        deserialize_with = "non_empty_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_id: Option<String>,

    /// Client/server tag, written even when empty
    #[serde(default)]
    pub side: String,

    /// Path prefix replacing `mods/`, used verbatim (include the trailing `/`)
    #[serde(
        default,
        deserialize_with = "non_empty_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub destination: Option<String>,
}

/// The slice of the pack that provider queries filter on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoaderContext {
    pub loader: String,
    pub game_version: String,
}

impl LoaderContext {
    pub fn new(loader: impl Into<String>, game_version: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            game_version: game_version.into(),
        }
    }
}

impl fmt::Display for LoaderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loader, self.game_version)
    }
}

impl PackSpec {
    /// Read, parse and validate a pack file
    pub fn load(path: &Path) -> Result<Self, PackSpecError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| PackSpecError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json(&content)
    }

    /// Parse and validate a pack document
    pub fn from_json(content: &str) -> Result<Self, PackSpecError> {
        let spec: PackSpec = serde_json::from_str(content)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Reject documents a build cannot proceed with
    pub fn validate(&self) -> Result<(), PackSpecError> {
        for (field, value) in [
            ("name", &self.name),
            ("loader", &self.loader),
            ("mcv", &self.game_version),
        ] {
            if value.trim().is_empty() {
                return Err(PackSpecError::Invalid {
                    reason: format!("'{}' must not be empty", field),
                });
            }
        }

        for (index, reference) in self.mods.iter().enumerate() {
            if reference.name.trim().is_empty() {
                return Err(PackSpecError::Invalid {
                    reason: format!("mod #{} has an empty name", index + 1),
                });
            }
            if reference.project_id.trim().is_empty() {
                return Err(PackSpecError::Invalid {
                    reason: format!("mod '{}' has an empty projectid", reference.name),
                });
            }
        }

        Ok(())
    }

    pub fn context(&self) -> LoaderContext {
        LoaderContext::new(&self.loader, &self.game_version)
    }
}

fn default_loader_version() -> String {
    DEFAULT_LOADER_VERSION.to_string()
}

/// Accept ids written as strings or bare numbers; empty strings mean "absent"
fn non_empty_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawId::Text(text)) if !text.trim().is_empty() => Some(text),
        Some(RawId::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    include!("spec.test.rs");
}
