//! Build pipeline
//!
//! One run: load the pack → pick a target profile → rebuild every target
//! tree from scratch → write manifests → archive each target.

use super::archive::{ArchiveError, zip_dir};
use super::manifest::{
    INDEX_FILE, INSTANCE_FILE, ManifestError, ModrinthIndex, write_instance_descriptor,
    write_pack_config,
};
use super::profile::select_profile;
use super::resolver::{ResolveError, Resolver};
use super::spec::{PackSpec, PackSpecError};
use super::target::Target;
use super::tree::{BuildLayout, TreeBuilder, TreeError};
use crate::api::{ProviderEndpoints, ProviderRegistry};
use crate::networking::{Fetcher, NetworkProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const PACK_ARCHIVE: &str = "config/mcinstanceloader/pack.mcinstance";

/// Build system errors
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("IO error on '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    PackSpec(#[from] PackSpecError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// Build result for one archived target
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub target: Target,
    pub output_path: PathBuf,
    pub artifacts: Vec<BuildArtifact>,
}

/// Individual build artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

/// Runs the build pipeline for one working directory
pub struct BuildOrchestrator {
    layout: BuildLayout,
    pack_file: PathBuf,
    network: Arc<dyn NetworkProvider>,
    endpoints: ProviderEndpoints,
}

impl BuildOrchestrator {
    pub fn new(
        workdir: PathBuf,
        pack_file: PathBuf,
        network: Arc<dyn NetworkProvider>,
        endpoints: ProviderEndpoints,
    ) -> Self {
        Self {
            layout: BuildLayout::new(workdir),
            pack_file,
            network,
            endpoints,
        }
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Execute the full pipeline, returning one result per archive
    pub async fn execute_build_pipeline(&self) -> Result<Vec<BuildResult>, BuildError> {
        let spec = Arc::new(PackSpec::load(&self.pack_file)?);
        let context = spec.context();
        let profile = select_profile(&context);
        info!(
            pack = %spec.name,
            version = %spec.version,
            %context,
            profile = profile.name,
            mods = spec.mods.len(),
            "starting build"
        );

        let fetcher = Arc::new(Fetcher::new(
            self.network.clone(),
            self.layout.staging_dir.clone(),
        ));
        let registry = Arc::new(ProviderRegistry::standard(
            self.network.clone(),
            &self.endpoints,
            spec.hash_github.then(|| fetcher.clone()),
        ));
        let resolver = Resolver::new(registry.clone(), context.clone());
        let tree = TreeBuilder::new(self.layout.clone(), profile, fetcher);

        tree.reset()?;
        tree.ensure_directories()?;
        tree.copy_sources()?;
        tree.install_bootstrap_mods(&resolver).await?;

        if profile.instance_descriptor {
            let path = self.layout.target_dir(Target::Generic).join(INSTANCE_FILE);
            write_instance_descriptor(&path, &spec.name)?;
        }

        if profile.instance_loader_manifest {
            let set = resolver.resolve_all("resources.packconfig", &spec.mods).await?;
            let archive = self.layout.game_dir(Target::Generic).join(PACK_ARCHIVE);
            write_pack_config(&set, &self.layout.pack_dir, &archive)?;
        }

        if profile.produces(Target::Modrinth) {
            self.write_modrinth_index(&spec, &resolver).await?;
        }

        tree.derive_targets()?;
        tree.install_loader_jar(&context).await?;
        tree.install_shims(&registry, &context).await?;
        tree.install_component_pins()?;

        let mut results = Vec::new();
        for target in profile.archived_targets() {
            if let Some(output) = self.layout.archive_path(target) {
                results.push(self.archive_target(target, output)?);
            }
        }

        info!(archives = results.len(), "build complete");
        Ok(results)
    }

    async fn write_modrinth_index(
        &self,
        spec: &PackSpec,
        resolver: &Resolver,
    ) -> Result<(), BuildError> {
        let references = spec
            .mods
            .iter()
            .filter(|reference| ModrinthIndex::includes(reference.kind));
        let set = resolver.resolve_all(INDEX_FILE, references).await?;

        let staged = self.layout.pack_dir.join(INDEX_FILE);
        ModrinthIndex::build(spec, &set).write(&staged)?;

        let dest = self.layout.target_dir(Target::Modrinth).join(INDEX_FILE);
        std::fs::copy(&staged, &dest).map_err(|source| BuildError::IoError {
            path: dest.clone(),
            source,
        })?;
        Ok(())
    }

    fn archive_target(&self, target: Target, output: PathBuf) -> Result<BuildResult, BuildError> {
        let source = self.layout.target_dir(target);
        zip_dir(&source, &output)?;
        let artifact = create_artifact(&output)?;

        Ok(BuildResult {
            target,
            output_path: output,
            artifacts: vec![artifact],
        })
    }

    /// Remove build trees, staged downloads and archives
    ///
    /// Returns the directories that were removed.
    pub fn clean(&self) -> Result<Vec<PathBuf>, BuildError> {
        let mut removed = Vec::new();
        for dir in [
            &self.layout.build_dir,
            &self.layout.staging_dir,
            &self.layout.output_dir,
        ] {
            if dir.exists() {
                std::fs::remove_dir_all(dir).map_err(|source| BuildError::IoError {
                    path: dir.clone(),
                    source,
                })?;
                info!(path = %dir.display(), "removed");
                removed.push(dir.clone());
            }
        }
        Ok(removed)
    }
}

/// Artifact metadata for a finished file
pub fn create_artifact(path: &Path) -> Result<BuildArtifact, BuildError> {
    let metadata = std::fs::metadata(path).map_err(|source| BuildError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(BuildArtifact {
        name,
        path: path.to_path_buf(),
        size: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    include!("builds.test.rs");
}
