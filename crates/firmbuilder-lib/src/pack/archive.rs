//! Deterministic zip archives
//!
//! Entries are written in sorted order with a fixed timestamp so the same
//! tree always produces the same bytes. Entry names are relative to the
//! parent of the archived directory: the archive's single top-level entry is
//! the directory itself.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Archive errors
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error on '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Zip error: {source}")]
    Zip {
        #[from]
        source: zip::result::ZipError,
    },

    #[error("Cannot archive '{path}': not a named directory")]
    InvalidSource { path: PathBuf },

    #[error("Archive entry '{name}' escapes the output directory")]
    UnsafeEntry { name: String },
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> ArchiveError + '_ {
    move |source| ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

/// Zip `source` into `output`, returning the number of entries written
pub fn zip_dir(source: &Path, output: &Path) -> Result<usize, ArchiveError> {
    let root_name = source
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|_| source.is_dir())
        .ok_or_else(|| ArchiveError::InvalidSource {
            path: source.to_path_buf(),
        })?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let file = File::create(output).map_err(io_err(output))?;
    let mut writer = ZipWriter::new(file);

    let mut count = 0;
    write_dir(&mut writer, source, root_name, &mut count)?;
    writer.finish()?;

    info!(
        source = %source.display(),
        archive = %output.display(),
        entries = count,
        "archived"
    );
    Ok(count)
}

fn write_dir(
    writer: &mut ZipWriter<File>,
    dir: &Path,
    name: &str,
    count: &mut usize,
) -> Result<(), ArchiveError> {
    writer.add_directory(format!("{}/", name), entry_options())?;
    *count += 1;

    let mut entries = std::fs::read_dir(dir)
        .map_err(io_err(dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err(dir))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let entry_name = format!("{}/{}", name, entry.file_name().to_string_lossy());

        if path.is_dir() {
            write_dir(writer, &path, &entry_name, count)?;
        } else {
            debug!(entry = %entry_name, "adding file");
            writer.start_file(entry_name, entry_options())?;
            let mut input = File::open(&path).map_err(io_err(&path))?;
            io::copy(&mut input, writer).map_err(io_err(&path))?;
            *count += 1;
        }
    }

    Ok(())
}

/// Write an archive holding one file entry
pub fn write_single_entry(output: &Path, name: &str, contents: &[u8]) -> Result<(), ArchiveError> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    let file = File::create(output).map_err(io_err(output))?;
    let mut writer = ZipWriter::new(file);

    writer.start_file(name, entry_options())?;
    writer.write_all(contents).map_err(io_err(output))?;
    writer.finish()?;

    debug!(archive = %output.display(), entry = name, "wrote single-entry archive");
    Ok(())
}

/// Unpack `archive` into `out_dir`, rejecting entries that would land outside it
pub fn extract(archive: &Path, out_dir: &Path) -> Result<usize, ArchiveError> {
    let file = File::open(archive).map_err(io_err(archive))?;
    let mut zip = ZipArchive::new(file)?;
    let mut count = 0;

    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ArchiveError::UnsafeEntry {
                name: entry.name().to_string(),
            })?;
        let out_path = out_dir.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path).map_err(io_err(&out_path))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err(parent))?;
        }

        // Declared sizes come from the archive header and are not trusted
        let mut out = File::create(&out_path).map_err(io_err(&out_path))?;
        io::copy(&mut entry, &mut out).map_err(io_err(&out_path))?;
        count += 1;
    }

    info!(archive = %archive.display(), into = %out_dir.display(), files = count, "extracted");
    Ok(count)
}

#[cfg(test)]
mod tests {
    include!("archive.test.rs");
}
