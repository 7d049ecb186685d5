//! # Pack building
//!
//! - [`spec`] - the `pack.json` document
//! - [`resolver`] - mod references to concrete artifacts
//! - [`profile`] / [`target`] - what a build produces for a loader context
//! - [`tree`] - per-target directory trees
//! - [`manifest`] - packconfig, Modrinth index and launcher metadata
//! - [`archive`] - deterministic zips
//! - [`builds`] - the pipeline tying them together

pub mod archive;
pub mod artifact;
pub mod builds;
pub mod manifest;
pub mod profile;
pub mod resolver;
pub mod spec;
pub mod target;
pub mod tree;

pub use archive::ArchiveError;
pub use artifact::{MODS_PREFIX, ResolvedArtifact, destination_path, filename_from_url};
pub use builds::{BuildArtifact, BuildError, BuildOrchestrator, BuildResult};
pub use manifest::{ManifestError, ModrinthIndex};
pub use profile::{TargetProfile, select_profile};
pub use resolver::{ResolveError, ResolvedSet, Resolver};
pub use spec::{LoaderContext, ModReference, PackSpec, PackSpecError};
pub use target::Target;
pub use tree::{BuildLayout, TreeBuilder, TreeError};
