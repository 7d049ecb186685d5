//! Instance-loader manifest (`resources.packconfig`)
//!
//! One INI-like section per resolved mod, in declaration order, separated by
//! blank lines. The file is shipped inside a single-entry `pack.mcinstance`
//! archive that the instance loader mod reads on first launch.

use super::{ManifestError, write_file};
use crate::networking::HashAlgorithm;
use crate::pack::archive::write_single_entry;
use crate::pack::{ResolvedArtifact, ResolvedSet};
use crate::primitives::ProviderKind;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

pub const PACKCONFIG_FILE: &str = "resources.packconfig";

/// Entry name inside `pack.mcinstance`
pub const PACK_ARCHIVE_ENTRY: &str = PACKCONFIG_FILE;

/// Renders a resolved set as packconfig sections
pub struct PackConfig<'a>(pub &'a ResolvedSet);

impl fmt::Display for PackConfig<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, artifact) in self.0.iter().enumerate() {
            if index != 0 {
                writeln!(f)?;
            }
            write_section(f, artifact)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, artifact: &ResolvedArtifact) -> fmt::Result {
    let provider_id = artifact.provider_id.as_deref().unwrap_or_default();

    writeln!(f, "[{}]", artifact.name)?;
    match artifact.kind {
        ProviderKind::Modrinth => {
            writeln!(f, "type = modrinth")?;
            writeln!(f, "versionId = {}", provider_id)?;
            writeln!(f, "destination = {}", artifact.destination)?;
            writeln!(f, "sourceFileName = {}", artifact.filename)?;
        }
        ProviderKind::CurseForge => {
            writeln!(f, "type = curseforge")?;
            writeln!(f, "projectId = {}", artifact.project_id)?;
            writeln!(f, "fileId = {}", provider_id)?;
            writeln!(f, "destination = {}", artifact.destination)?;
        }
        ProviderKind::Github | ProviderKind::Url => {
            writeln!(f, "type = url")?;
            writeln!(f, "url = {}", artifact.url)?;
            writeln!(f, "destination = {}", artifact.destination)?;
            if let Some(hash) = artifact
                .hash
                .as_ref()
                .filter(|hash| hash.algorithm == HashAlgorithm::Md5)
            {
                writeln!(f, "MD5 = {}", hash.value)?;
            }
        }
    }
    writeln!(f, "side = {}", artifact.side)
}

/// Write `resources.packconfig` into `pack_dir` and wrap it into `archive`
///
/// Returns the path of the plain-text packconfig.
pub fn write_pack_config(
    set: &ResolvedSet,
    pack_dir: &Path,
    archive: &Path,
) -> Result<PathBuf, ManifestError> {
    let rendered = PackConfig(set).to_string();
    let path = pack_dir.join(PACKCONFIG_FILE);

    write_file(&path, &rendered)?;
    write_single_entry(archive, PACK_ARCHIVE_ENTRY, rendered.as_bytes())?;

    info!(
        sections = set.len(),
        archive = %archive.display(),
        "instance-loader manifest written"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    include!("instance_loader.test.rs");
}
