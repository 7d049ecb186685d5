//! Manifest writers
//!
//! Each writer turns a [`ResolvedSet`](super::ResolvedSet) (or the pack
//! itself) into one target's configuration language.

pub mod instance;
pub mod instance_loader;
pub mod modrinth_index;

pub use instance::{
    INSTANCE_FILE, PinSource, builtin_component_pins, instance_descriptor,
    write_component_pins, write_instance_descriptor,
};
pub use instance_loader::{PACK_ARCHIVE_ENTRY, PACKCONFIG_FILE, PackConfig, write_pack_config};
pub use modrinth_index::{INDEX_FILE, IndexDependencies, IndexFile, ModrinthIndex};

use super::archive::ArchiveError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Write `contents` to `path`, creating parent directories
pub(crate) fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), ManifestError> {
    let io_err = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, contents).map_err(io_err)
}
