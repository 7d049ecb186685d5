//! Artifact fetcher
//!
//! Downloads a URL to a local path. An existing file short-circuits the
//! download; when the caller knows the expected digest, the existing file is
//! hashed first and only a matching file is kept.

use super::{NetworkProvider, NetworkingError};
use md5::{Digest as Md5Digest, Md5};
use sha1::{Digest, Sha1};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fetcher errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Download failed: {source}")]
    Network {
        #[from]
        source: NetworkingError,
    },

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Hash mismatch for '{path}': expected {expected}, got {actual}")]
    HashMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Digest algorithms exposed by the providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Md5,
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha1 => write!(f, "sha1"),
            HashAlgorithm::Md5 => write!(f, "md5"),
        }
    }
}

/// Hex digest tagged with its algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHash {
    pub algorithm: HashAlgorithm,
    pub value: String,
}

impl ContentHash {
    pub fn sha1(value: impl Into<String>) -> Self {
        Self {
            algorithm: HashAlgorithm::Sha1,
            value: value.into(),
        }
    }

    pub fn md5(value: impl Into<String>) -> Self {
        Self {
            algorithm: HashAlgorithm::Md5,
            value: value.into(),
        }
    }

    /// Hex digests compare case-insensitively
    pub fn matches(&self, actual: &str) -> bool {
        self.value.eq_ignore_ascii_case(actual)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.value)
    }
}

/// What `fetch` did for a destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// File written from the network
    Downloaded { bytes: u64 },
    /// Existing file kept, no request issued
    Skipped,
}

/// Downloads artifacts through a [`NetworkProvider`] into a staging directory
pub struct Fetcher {
    network: Arc<dyn NetworkProvider>,
    staging_dir: PathBuf,
}

impl Fetcher {
    pub fn new(network: Arc<dyn NetworkProvider>, staging_dir: PathBuf) -> Self {
        Self {
            network,
            staging_dir,
        }
    }

    /// Directory that `stage` downloads into
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Download `url` to `dest` unless an acceptable file is already there
    pub async fn fetch(
        &self,
        url: &str,
        dest: &Path,
        expected: Option<&ContentHash>,
    ) -> Result<FetchOutcome, FetchError> {
        if dest.is_file() {
            match expected {
                None => {
                    info!(path = %dest.display(), "exists, not redownloading");
                    return Ok(FetchOutcome::Skipped);
                }
                Some(hash) => {
                    let actual = Self::hash_file(dest, hash.algorithm)?;
                    if hash.matches(&actual) {
                        info!(path = %dest.display(), %hash, "exists with expected hash, not redownloading");
                        return Ok(FetchOutcome::Skipped);
                    }
                    warn!(
                        path = %dest.display(),
                        expected = %hash.value,
                        actual = %actual,
                        "existing file has a stale hash, redownloading"
                    );
                }
            }
        }

        let bytes = self.network.get_bytes(url, &[]).await?;

        // Rejected bodies never touch disk; a stale file is dropped with them
        if let Some(hash) = expected {
            let actual = digest_hex(&bytes, hash.algorithm);
            if !hash.matches(&actual) {
                if dest.is_file() {
                    tokio::fs::remove_file(dest)
                        .await
                        .map_err(|source| io_error(dest, source))?;
                }
                return Err(FetchError::HashMismatch {
                    path: dest.display().to_string(),
                    expected: hash.value.clone(),
                    actual,
                });
            }
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| io_error(parent, source))?;
        }
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|source| io_error(dest, source))?;

        info!(url, path = %dest.display(), size = bytes.len(), "downloaded");
        Ok(FetchOutcome::Downloaded {
            bytes: bytes.len() as u64,
        })
    }

    /// Download into the staging directory under `filename`, returning the staged path
    pub async fn stage(
        &self,
        url: &str,
        filename: &str,
        expected: Option<&ContentHash>,
    ) -> Result<PathBuf, FetchError> {
        let dest = self.staging_dir.join(filename);
        self.fetch(url, &dest, expected).await?;
        Ok(dest)
    }

    /// Hex digest of a file on disk
    pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> Result<String, FetchError> {
        let bytes = std::fs::read(path).map_err(|source| io_error(path, source))?;
        let digest = digest_hex(&bytes, algorithm);
        debug!(path = %path.display(), %algorithm, %digest, "hashed file");
        Ok(digest)
    }
}

fn digest_hex(bytes: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Sha1 => hex::encode(Sha1::digest(bytes)),
        HashAlgorithm::Md5 => hex::encode(Md5::digest(bytes)),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> FetchError {
    FetchError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    include!("fetcher.test.rs");
}
