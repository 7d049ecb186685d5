//! Target tree materialization
//!
//! The generic tree is staged first; every other target starts as a full copy
//! of (part of) it and then gets its own extras layered on top, so no target
//! ever writes into another target's files.

use super::archive::{ArchiveError, extract};
use super::artifact::filename_from_url;
use super::manifest::{ManifestError, PinSource, write_component_pins};
use super::profile::TargetProfile;
use super::resolver::{ResolveError, Resolver};
use super::spec::{LoaderContext, ModReference};
use super::target::Target;
use crate::api::{ProviderError, ProviderRegistry};
use crate::networking::{FetchError, Fetcher};
use crate::primitives::ProviderKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Tree building errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Cannot derive a filename from URL '{url}'")]
    InvalidUrl { url: String },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> TreeError + '_ {
    move |source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Fixed directory layout under the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    pub workdir: PathBuf,
    /// `src/`: user overrides copied into the generic game directory
    pub source_dir: PathBuf,
    /// `bld/`: one tree per target, rebuilt from scratch every run
    pub build_dir: PathBuf,
    /// `tmp/`: download staging, kept between runs
    pub staging_dir: PathBuf,
    /// `pack/`: intermediate manifests
    pub pack_dir: PathBuf,
    /// `out/`: finished archives
    pub output_dir: PathBuf,
}

impl BuildLayout {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        let workdir = workdir.into();
        Self {
            source_dir: workdir.join("src"),
            build_dir: workdir.join("bld"),
            staging_dir: workdir.join("tmp"),
            pack_dir: workdir.join("pack"),
            output_dir: workdir.join("out"),
            workdir,
        }
    }

    pub fn target_dir(&self, target: Target) -> PathBuf {
        self.build_dir.join(target.dir_name())
    }

    pub fn game_dir(&self, target: Target) -> PathBuf {
        let root = self.target_dir(target);
        match target.game_dir() {
            "" => root,
            dir => root.join(dir),
        }
    }

    pub fn mods_dir(&self, target: Target) -> PathBuf {
        self.game_dir(target).join("mods")
    }

    pub fn archive_path(&self, target: Target) -> Option<PathBuf> {
        target.archive_name().map(|name| self.output_dir.join(name))
    }
}

/// Recursively copy the contents of `src` into `dst`
///
/// Returns the number of files copied. A missing `src` copies nothing.
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<usize, TreeError> {
    std::fs::create_dir_all(dst).map_err(io_err(dst))?;
    if !src.is_dir() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in std::fs::read_dir(src).map_err(io_err(src))? {
        let entry = entry.map_err(io_err(src))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copied += copy_dir_contents(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).map_err(io_err(&src_path))?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_file(from: &Path, to: &Path) -> Result<(), TreeError> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    std::fs::copy(from, to).map_err(io_err(from))?;
    Ok(())
}

/// Builds the per-target directory trees for one profile
pub struct TreeBuilder {
    layout: BuildLayout,
    profile: &'static TargetProfile,
    fetcher: Arc<Fetcher>,
}

impl TreeBuilder {
    pub fn new(layout: BuildLayout, profile: &'static TargetProfile, fetcher: Arc<Fetcher>) -> Self {
        Self {
            layout,
            profile,
            fetcher,
        }
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    pub fn profile(&self) -> &'static TargetProfile {
        self.profile
    }

    /// Remove every target tree
    pub fn reset(&self) -> Result<(), TreeError> {
        let build_dir = &self.layout.build_dir;
        if build_dir.exists() {
            std::fs::remove_dir_all(build_dir).map_err(io_err(build_dir))?;
            debug!(path = %build_dir.display(), "removed previous build trees");
        }
        Ok(())
    }

    /// Create the working directories and every target skeleton
    pub fn ensure_directories(&self) -> Result<(), TreeError> {
        let layout = &self.layout;
        let fixed = [
            layout.staging_dir.clone(),
            layout.pack_dir.clone(),
            layout.output_dir.clone(),
            layout.source_dir.join("config"),
            layout.source_dir.join("modpack"),
            layout.source_dir.join("mods"),
        ];

        let skeletons = self.profile.targets.iter().flat_map(|&target| {
            let root = layout.target_dir(target);
            target.skeleton().iter().map(move |dir| root.join(dir))
        });

        for dir in fixed.into_iter().chain(skeletons) {
            std::fs::create_dir_all(&dir).map_err(io_err(&dir))?;
        }
        Ok(())
    }

    /// Copy `src/` into the generic game directory
    pub fn copy_sources(&self) -> Result<usize, TreeError> {
        let dest = self.layout.game_dir(Target::Generic);
        let copied = copy_dir_contents(&self.layout.source_dir, &dest)?;
        info!(files = copied, into = %dest.display(), "copied pack sources");
        Ok(copied)
    }

    /// Download the profile's bootstrap mods into the generic mods folder
    pub async fn install_bootstrap_mods(&self, resolver: &Resolver) -> Result<Vec<PathBuf>, TreeError> {
        let mods_dir = self.layout.mods_dir(Target::Generic);
        let mut installed = Vec::new();

        for &project_id in self.profile.bootstrap_mods {
            let reference = ModReference {
                name: project_id.to_string(),
                kind: ProviderKind::Modrinth,
                project_id: project_id.to_string(),
                file_id: None,
                side: String::new(),
                destination: None,
            };

            let Some(artifact) = resolver.resolve(&reference).await? else {
                warn!(project_id, "bootstrap mod unavailable, skipping");
                continue;
            };

            let staged = self
                .fetcher
                .stage(&artifact.url, &artifact.filename, artifact.hash.as_ref())
                .await?;
            let dest = mods_dir.join(&artifact.filename);
            copy_file(&staged, &dest)?;

            info!(project_id, file = %artifact.filename, "installed bootstrap mod");
            installed.push(dest);
        }

        Ok(installed)
    }

    /// Copy the generic tree into every derived target
    pub fn derive_targets(&self) -> Result<(), TreeError> {
        let generic = self.layout.target_dir(Target::Generic);

        for &target in self.profile.targets {
            let Some(seed) = target.seed() else {
                continue;
            };
            let from = generic.join(seed.from);
            let into = self.layout.target_dir(target).join(seed.into);
            let copied = copy_dir_contents(&from, &into)?;
            debug!(%target, files = copied, "derived target tree");
        }

        Ok(())
    }

    /// Install the pinned loader jar, if the profile has one
    pub async fn install_loader_jar(&self, context: &LoaderContext) -> Result<Option<PathBuf>, TreeError> {
        let Some(jar) = self.profile.loader_jar else {
            if self
                .profile
                .unimplemented_loaders
                .iter()
                .any(|loader| *loader == context.loader)
            {
                info!(loader = %context.loader, "loader jar install not implemented, doing nothing");
            } else {
                debug!(loader = %context.loader, "no loader jar for this profile");
            }
            return Ok(None);
        };

        let filename = filename_from_url(jar.url).ok_or_else(|| TreeError::InvalidUrl {
            url: jar.url.to_string(),
        })?;
        let staged = self.fetcher.stage(jar.url, &filename, None).await?;
        let dest = self.layout.target_dir(jar.target).join(jar.slot);
        copy_file(&staged, &dest)?;

        info!(target = %jar.target, slot = jar.slot, "installed loader jar");
        Ok(Some(dest))
    }

    /// Install GitHub-hosted shims
    ///
    /// The companion archive is unpacked over the target root before the
    /// primary jar is copied into the target's mods folder.
    pub async fn install_shims(
        &self,
        registry: &ProviderRegistry,
        context: &LoaderContext,
    ) -> Result<(), TreeError> {
        for shim in self.profile.shims {
            let candidates = registry
                .resolve(ProviderKind::Github, shim.repository, context)
                .await?;
            let Some(candidate) = candidates.into_iter().next() else {
                warn!(repository = shim.repository, "shim has no usable release, skipping");
                continue;
            };

            if let Some(companion_url) = &candidate.companion_url {
                let filename =
                    filename_from_url(companion_url).ok_or_else(|| TreeError::InvalidUrl {
                        url: companion_url.clone(),
                    })?;
                let staged = self.fetcher.stage(companion_url, &filename, None).await?;
                extract(&staged, &self.layout.target_dir(shim.target))?;
            } else {
                warn!(repository = shim.repository, "shim release has no companion package");
            }

            let staged = self
                .fetcher
                .stage(&candidate.url, &candidate.filename, candidate.hash.as_ref())
                .await?;
            copy_file(&staged, &self.layout.mods_dir(shim.target).join(&candidate.filename))?;

            info!(
                repository = shim.repository,
                target = %shim.target,
                file = %candidate.filename,
                "installed shim"
            );
        }

        Ok(())
    }

    /// Place the launcher component pins, if the profile has them
    pub fn install_component_pins(&self) -> Result<Option<PinSource>, TreeError> {
        let Some(pins) = self.profile.component_pins else {
            return Ok(None);
        };

        let source = self.layout.workdir.join(pins.source_file);
        let dest = self.layout.target_dir(pins.target).join(pins.slot);
        Ok(Some(write_component_pins(&source, &dest)?))
    }
}

#[cfg(test)]
mod tests {
    include!("tree.test.rs");
}
