//! Resolved artifacts and the path rules they follow

use crate::networking::ContentHash;
use crate::primitives::ProviderKind;
use percent_encoding::percent_decode_str;
use reqwest::Url;

/// Default destination prefix for mods
pub const MODS_PREFIX: &str = "mods/";

/// A mod reference resolved to one concrete download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    /// Display name from the pack spec
    pub name: String,
    pub kind: ProviderKind,
    /// Provider identifier from the pack spec
    pub project_id: String,
    /// Modrinth version id or CurseForge file id (after overrides)
    pub provider_id: Option<String>,
    pub url: String,
    pub filename: String,
    pub hash: Option<ContentHash>,
    /// `None` when the provider does not report a size
    pub size: Option<u64>,
    /// Destination override from the pack spec, if any
    pub destination_override: Option<String>,
    /// Path relative to the instance root
    pub destination: String,
    pub side: String,
}

/// `override + filename` when an override is present, `mods/ + filename` otherwise
pub fn destination_path(destination_override: Option<&str>, filename: &str) -> String {
    match destination_override {
        Some(prefix) => format!("{}{}", prefix, filename),
        None => format!("{}{}", MODS_PREFIX, filename),
    }
}

/// Last path segment of a URL, percent-decoded
///
/// Returns `None` for unparseable URLs and URLs whose path ends in `/`.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;
    if segment.is_empty() {
        return None;
    }
    Some(percent_decode_str(segment).decode_utf8_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_path_rules() {
        assert_eq!(destination_path(None, "x.jar"), "mods/x.jar");
        assert_eq!(
            destination_path(Some("mods/1.7.10/"), "x.jar"),
            "mods/1.7.10/x.jar"
        );
        // Used verbatim, no separator inserted
        assert_eq!(destination_path(Some("config"), "x.cfg"), "configx.cfg");
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://cdn.modrinth.com/data/AABB/versions/1/x.jar").as_deref(),
            Some("x.jar")
        );
        assert_eq!(
            filename_from_url("https://example.com/files/My%20Mod%2B1.jar?token=abc").as_deref(),
            Some("My Mod+1.jar")
        );
        assert_eq!(filename_from_url("https://example.com/files/"), None);
        assert_eq!(filename_from_url("not a url"), None);
    }
}
