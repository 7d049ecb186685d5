//! Artifact provider kinds
//!
//! Canonical enumeration of where a mod reference is resolved. Three kinds
//! are catalog services queried over HTTP; the fourth is a raw download URL
//! that needs no lookup at all.

use serde::{Deserialize, Serialize};

/// Provider kind named by a mod reference's `type` field
///
/// # Usage
/// ```
/// use firmbuilder_lib::primitives::ProviderKind;
///
/// let kind: ProviderKind = "modrinth".parse().unwrap();
/// assert_eq!(kind, ProviderKind::Modrinth);
/// assert!(kind.is_catalog());
/// assert_eq!(ProviderKind::Url.to_string(), "url");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Modrinth version listings (https://modrinth.com)
    Modrinth,
    /// CurseForge-compatible file listings
    CurseForge,
    /// GitHub releases of a repository
    Github,
    /// Direct download URL, no catalog lookup
    Url,
}

impl ProviderKind {
    /// All kinds, in declaration order
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Modrinth,
        ProviderKind::CurseForge,
        ProviderKind::Github,
        ProviderKind::Url,
    ];

    /// Whether resolution requires querying a remote catalog
    pub fn is_catalog(&self) -> bool {
        !matches!(self, ProviderKind::Url)
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "modrinth" => Ok(ProviderKind::Modrinth),
            "curseforge" => Ok(ProviderKind::CurseForge),
            "github" => Ok(ProviderKind::Github),
            "url" => Ok(ProviderKind::Url),
            _ => Err(format!("Invalid provider type: {}", s)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Modrinth => write!(f, "modrinth"),
            ProviderKind::CurseForge => write!(f, "curseforge"),
            ProviderKind::Github => write!(f, "github"),
            ProviderKind::Url => write!(f, "url"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(
            "modrinth".parse::<ProviderKind>().unwrap(),
            ProviderKind::Modrinth
        );
        assert_eq!(
            "CurseForge".parse::<ProviderKind>().unwrap(),
            ProviderKind::CurseForge
        );
        assert_eq!("github".parse::<ProviderKind>().unwrap(), ProviderKind::Github);
        assert_eq!("URL".parse::<ProviderKind>().unwrap(), ProviderKind::Url);
        assert!("forge".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.to_string().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serialization_uses_lowercase_tags() {
        let json = serde_json::to_string(&ProviderKind::CurseForge).unwrap();
        assert_eq!(json, "\"curseforge\"");

        let parsed: ProviderKind = serde_json::from_str("\"github\"").unwrap();
        assert_eq!(parsed, ProviderKind::Github);
    }

    #[test]
    fn test_only_url_skips_catalog() {
        let catalog: Vec<ProviderKind> = ProviderKind::ALL
            .into_iter()
            .filter(ProviderKind::is_catalog)
            .collect();
        assert_eq!(
            catalog,
            vec![ProviderKind::Modrinth, ProviderKind::CurseForge, ProviderKind::Github]
        );
    }
}
