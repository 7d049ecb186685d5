//! Mod reference resolution
//!
//! Applies the per-reference override rules on top of provider results and
//! collects one artifact per destination path.

use super::artifact::{ResolvedArtifact, destination_path};
use super::spec::{LoaderContext, ModReference};
use crate::api::{ProviderError, ProviderRegistry};
use crate::primitives::ProviderKind;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, Span, debug, info, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

/// Resolution errors
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to resolve '{name}' ({kind} {project_id}): {source}")]
    Provider {
        name: String,
        kind: ProviderKind,
        project_id: String,
        source: ProviderError,
    },
}

/// Resolves mod references against the registered providers
pub struct Resolver {
    registry: Arc<ProviderRegistry>,
    context: LoaderContext,
}

impl Resolver {
    pub fn new(registry: Arc<ProviderRegistry>, context: LoaderContext) -> Self {
        Self { registry, context }
    }

    pub fn context(&self) -> &LoaderContext {
        &self.context
    }

    /// Resolve one reference; `Ok(None)` when the provider has nothing for this context
    pub async fn resolve(
        &self,
        reference: &ModReference,
    ) -> Result<Option<ResolvedArtifact>, ResolveError> {
        let candidates = self
            .registry
            .resolve(reference.kind, &reference.project_id, &self.context)
            .await
            .map_err(|source| ResolveError::Provider {
                name: reference.name.clone(),
                kind: reference.kind,
                project_id: reference.project_id.clone(),
                source,
            })?;

        let Some(candidate) = candidates.into_iter().next() else {
            warn!(
                name = %reference.name,
                kind = %reference.kind,
                project_id = %reference.project_id,
                context = %self.context,
                "project not found for this version, omitting"
            );
            return Ok(None);
        };

        let provider_id = match (&reference.file_id, reference.kind) {
            (Some(file_id), ProviderKind::CurseForge) => {
                info!(
                    project_id = %reference.project_id,
                    file_id = %file_id,
                    "file id overridden"
                );
                Some(file_id.clone())
            }
            (Some(file_id), kind) => {
                debug!(%kind, file_id = %file_id, "file id override ignored for this provider");
                candidate.provider_id
            }
            (None, _) => candidate.provider_id,
        };

        if let Some(prefix) = &reference.destination {
            info!(
                project_id = %reference.project_id,
                destination = %prefix,
                "destination overridden"
            );
        }

        let destination = destination_path(reference.destination.as_deref(), &candidate.filename);

        Ok(Some(ResolvedArtifact {
            name: reference.name.clone(),
            kind: reference.kind,
            project_id: reference.project_id.clone(),
            provider_id,
            url: candidate.url,
            filename: candidate.filename,
            hash: candidate.hash,
            size: candidate.size,
            destination_override: reference.destination.clone(),
            destination,
            side: reference.side.clone(),
        }))
    }

    /// Resolve references in declaration order, skipping those not found
    ///
    /// `label` names the manifest being built; it shows on the progress bar.
    pub async fn resolve_all<'r, I>(
        &self,
        label: &str,
        references: I,
    ) -> Result<ResolvedSet, ResolveError>
    where
        I: IntoIterator<Item = &'r ModReference>,
    {
        let references: Vec<&ModReference> = references.into_iter().collect();
        let span = crate::progress_span!(label, total = references.len());
        span.pb_set_length(references.len() as u64);

        async {
            let mut set = ResolvedSet::new();
            for reference in references {
                if let Some(artifact) = self.resolve(reference).await? {
                    set.insert(artifact);
                }
                Span::current().pb_inc(1);
            }
            Ok::<_, ResolveError>(set)
        }
        .instrument(span)
        .await
    }
}

/// Resolved artifacts in declaration order, at most one per destination path
#[derive(Debug, Clone, Default)]
pub struct ResolvedSet {
    artifacts: Vec<ResolvedArtifact>,
    by_destination: HashMap<String, usize>,
}

impl ResolvedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact; an earlier artifact at the same destination is replaced in place
    pub fn insert(&mut self, artifact: ResolvedArtifact) -> Option<ResolvedArtifact> {
        match self.by_destination.get(&artifact.destination) {
            Some(&index) => {
                warn!(
                    destination = %artifact.destination,
                    previous = %self.artifacts[index].name,
                    replacement = %artifact.name,
                    "destination collision, later reference wins"
                );
                Some(std::mem::replace(&mut self.artifacts[index], artifact))
            }
            None => {
                self.by_destination
                    .insert(artifact.destination.clone(), self.artifacts.len());
                self.artifacts.push(artifact);
                None
            }
        }
    }

    pub fn get(&self, destination: &str) -> Option<&ResolvedArtifact> {
        self.by_destination
            .get(destination)
            .map(|&index| &self.artifacts[index])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedArtifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResolvedSet {
    type Item = &'a ResolvedArtifact;
    type IntoIter = std::slice::Iter<'a, ResolvedArtifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    include!("resolver.test.rs");
}
