//! Direct download URLs
//!
//! The identifier is the download URL; nothing is queried.

use super::{ArtifactProvider, Candidate, ProviderError, ProviderFuture};
use crate::pack::{LoaderContext, filename_from_url};
use crate::primitives::ProviderKind;

/// Client for `url` references
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectUrlClient;

impl DirectUrlClient {
    /// Single candidate named after the URL's last path segment
    pub fn candidate(url: &str) -> Result<Candidate, ProviderError> {
        let filename = filename_from_url(url).ok_or_else(|| ProviderError::InvalidUrl {
            url: url.to_string(),
        })?;
        Ok(Candidate::new(ProviderKind::Url, url, filename))
    }
}

impl ArtifactProvider for DirectUrlClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Url
    }

    fn resolve<'a>(
        &'a self,
        identifier: &'a str,
        _context: &'a LoaderContext,
    ) -> ProviderFuture<'a> {
        let result = Self::candidate(identifier).map(|candidate| vec![candidate]);
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identifier_is_the_url() {
        let candidates = DirectUrlClient
            .resolve(
                "https://example.com/files/cfg-pack-1.2.zip",
                &LoaderContext::new("forge", "1.7.10"),
            )
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://example.com/files/cfg-pack-1.2.zip");
        assert_eq!(candidates[0].filename, "cfg-pack-1.2.zip");
        assert_eq!(candidates[0].hash, None);
        assert_eq!(candidates[0].size, None);
    }

    #[test]
    fn test_url_without_filename_is_rejected() {
        let err = DirectUrlClient::candidate("https://example.com/").unwrap_err();
        assert!(matches!(err, ProviderError::InvalidUrl { .. }));
    }
}
