//! Throwaway workdirs for tests
//!
//! Paths are always given relative to the fixture root, the way they appear
//! under a real workdir (`pack.json`, `src/config/...`, `bld/technic/...`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A workdir removed when the fixture drops
pub struct TempDirFixture {
    root: TempDir,
}

impl TempDirFixture {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            root: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn create_dir(&self, relative: &str) -> io::Result<()> {
        fs::create_dir_all(self.join(relative))
    }

    /// Write a file, creating missing parents
    pub fn write_file(&self, relative: &str, contents: impl AsRef<[u8]>) -> io::Result<()> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    pub fn read_file(&self, relative: &str) -> io::Result<String> {
        fs::read_to_string(self.join(relative))
    }

    /// True for files and directories alike
    pub fn file_exists(&self, relative: &str) -> bool {
        self.join(relative).exists()
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
