//! Output targets and their on-disk shape

use std::fmt;

/// One supported packaging format / launcher layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Staging instance every other tree is copied from
    Generic,
    /// MultiMC instance import
    MultiMc,
    /// PolyMC/Prism instance import (carries the LWJGL3 shim)
    PolyMc,
    /// Technic launcher pack (`bin/modpack.jar`)
    Technic,
    /// CurseForge-style game directory zip
    CurseForge,
    /// Modrinth pack (`modrinth.index.json` + `overrides/`)
    Modrinth,
}

/// Which part of the generic tree a derived target starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    /// Path inside the generic tree (empty = whole tree)
    pub from: &'static str,
    /// Path inside the target tree (empty = target root)
    pub into: &'static str,
}

impl Target {
    pub const ALL: [Target; 6] = [
        Target::Generic,
        Target::MultiMc,
        Target::PolyMc,
        Target::Technic,
        Target::CurseForge,
        Target::Modrinth,
    ];

    /// Directory under the build root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Target::Generic => "generic",
            Target::MultiMc => "multimc",
            Target::PolyMc => "polymc",
            Target::Technic => "technic",
            Target::CurseForge => "curse",
            Target::Modrinth => "modrinth",
        }
    }

    /// Archive file name under the output directory; the generic tree is not archived
    pub fn archive_name(&self) -> Option<String> {
        match self {
            Target::Generic => None,
            other => Some(format!("{}.zip", other.dir_name())),
        }
    }

    /// Directories created before anything is copied in
    pub fn skeleton(&self) -> &'static [&'static str] {
        match self {
            Target::Generic => &[".minecraft/mods", ".minecraft/config/mcinstanceloader"],
            Target::MultiMc | Target::PolyMc => &[".minecraft/mods"],
            Target::Technic => &["bin"],
            Target::CurseForge => &["mods"],
            Target::Modrinth => &["overrides/mods"],
        }
    }

    /// How the target is seeded from the generic tree
    pub fn seed(&self) -> Option<Seed> {
        match self {
            Target::Generic => None,
            Target::MultiMc | Target::PolyMc => Some(Seed { from: "", into: "" }),
            Target::Technic | Target::CurseForge => Some(Seed {
                from: ".minecraft",
                into: "",
            }),
            Target::Modrinth => Some(Seed {
                from: ".minecraft",
                into: "overrides",
            }),
        }
    }

    /// Game directory (where `mods/` lives) relative to the target root
    pub fn game_dir(&self) -> &'static str {
        match self {
            Target::Generic | Target::MultiMc | Target::PolyMc => ".minecraft",
            Target::Technic | Target::CurseForge => "",
            Target::Modrinth => "overrides",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_names() {
        let archives: Vec<String> = Target::ALL
            .iter()
            .filter_map(Target::archive_name)
            .collect();

        assert_eq!(
            archives,
            vec!["multimc.zip", "polymc.zip", "technic.zip", "curse.zip", "modrinth.zip"]
        );
    }

    #[test]
    fn test_every_derived_target_is_seeded() {
        for target in Target::ALL {
            assert_eq!(target.seed().is_none(), target == Target::Generic);
        }
    }

    #[test]
    fn test_seed_lands_in_game_dir() {
        // Seeding from `.minecraft` must put mods where the target expects them
        for target in Target::ALL {
            if let Some(seed) = target.seed() {
                let seeded_game_dir = if seed.from.is_empty() {
                    ".minecraft"
                } else {
                    seed.into
                };
                assert_eq!(seeded_game_dir, target.game_dir(), "{}", target);
            }
        }
    }
}
