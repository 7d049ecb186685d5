//! Target profiles
//!
//! A profile is plain data describing what a build produces for a loader
//! context. Profiles are checked in order and the first match wins, so a new
//! version quirk is a new entry rather than another conditional in the
//! pipeline.

use super::spec::LoaderContext;
use super::target::Target;

/// Which loader contexts a profile applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// Exact loader and game version
    Exact {
        loader: &'static str,
        game_version: &'static str,
    },
    /// Every context
    Any,
}

impl MatchRule {
    pub fn matches(&self, context: &LoaderContext) -> bool {
        match self {
            MatchRule::Exact {
                loader,
                game_version,
            } => context.loader == *loader && context.game_version == *game_version,
            MatchRule::Any => true,
        }
    }
}

/// Pinned loader binary installed into a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderJar {
    pub url: &'static str,
    pub target: Target,
    /// Path inside the target tree
    pub slot: &'static str,
}

/// GitHub-hosted compatibility shim
///
/// The primary release asset goes into the target's mods folder; the
/// companion `multimc` archive is unpacked over the target root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shim {
    pub repository: &'static str,
    pub target: Target,
}

/// Launcher component pinning file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentPins {
    /// File in the workdir copied verbatim when present
    pub source_file: &'static str,
    pub target: Target,
    /// Path inside the target tree
    pub slot: &'static str,
}

/// Everything a build does for one class of loader contexts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProfile {
    pub name: &'static str,
    pub rule: MatchRule,
    pub targets: &'static [Target],
    /// Modrinth project ids installed into the generic mods folder
    pub bootstrap_mods: &'static [&'static str],
    pub instance_descriptor: bool,
    pub instance_loader_manifest: bool,
    pub loader_jar: Option<LoaderJar>,
    /// Loaders whose jar install is known to be missing; logged, not an error
    pub unimplemented_loaders: &'static [&'static str],
    pub shims: &'static [Shim],
    pub component_pins: Option<ComponentPins>,
}

/// Forge 1.7.10: full target fan-out with bootstrap mods and the LWJGL3 shim
pub const LEGACY_FORGE: TargetProfile = TargetProfile {
    name: "legacy-forge",
    rule: MatchRule::Exact {
        loader: "forge",
        game_version: "1.7.10",
    },
    targets: &[
        Target::Generic,
        Target::MultiMc,
        Target::PolyMc,
        Target::Technic,
        Target::CurseForge,
        Target::Modrinth,
    ],
    // MC Instance Loader, UniMixins
    bootstrap_mods: &["cUtsYbG5", "ghjoiQAl"],
    instance_descriptor: true,
    instance_loader_manifest: true,
    loader_jar: Some(LoaderJar {
        url: "https://maven.minecraftforge.net/net/minecraftforge/forge/1.7.10-10.13.4.1614-1.7.10/forge-1.7.10-10.13.4.1614-1.7.10-universal.jar",
        target: Target::Technic,
        slot: "bin/modpack.jar",
    }),
    unimplemented_loaders: &[],
    shims: &[Shim {
        repository: "GTNewHorizons/lwjgl3ify",
        target: Target::PolyMc,
    }],
    component_pins: Some(ComponentPins {
        source_file: "8.json",
        target: Target::MultiMc,
        slot: "mmc-pack.json",
    }),
};

/// Everything else: generic staging tree and a Modrinth pack
pub const STANDARD: TargetProfile = TargetProfile {
    name: "standard",
    rule: MatchRule::Any,
    targets: &[Target::Generic, Target::Modrinth],
    bootstrap_mods: &[],
    instance_descriptor: false,
    instance_loader_manifest: false,
    loader_jar: None,
    unimplemented_loaders: &["fabric"],
    shims: &[],
    component_pins: None,
};

/// Built-in profiles in match order
pub const BUILTIN_PROFILES: [&TargetProfile; 2] = [&LEGACY_FORGE, &STANDARD];

impl TargetProfile {
    pub fn produces(&self, target: Target) -> bool {
        self.targets.contains(&target)
    }

    /// Targets that end up as archives, in build order
    pub fn archived_targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.targets
            .iter()
            .copied()
            .filter(|target| target.archive_name().is_some())
    }
}

/// First built-in profile matching the context
pub fn select_profile(context: &LoaderContext) -> &'static TargetProfile {
    BUILTIN_PROFILES
        .into_iter()
        .find(|profile| profile.rule.matches(context))
        .unwrap_or(&STANDARD)
}

#[cfg(test)]
mod tests {
    include!("profile.test.rs");
}
