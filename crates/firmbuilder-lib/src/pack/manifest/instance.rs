//! Launcher instance metadata: `instance.cfg` and component pins

use super::{ManifestError, write_file};
use serde_json::{Value, json};
use std::path::Path;
use tracing::info;

pub const INSTANCE_FILE: &str = "instance.cfg";

const ICON_KEY: &str = "flame";
const LWJGL_VERSION: &str = "2.9.4-nightly-20150209";
const GAME_VERSION: &str = "1.7.10";
const FORGE_VERSION: &str = "10.13.4.1614";

pub fn instance_descriptor(pack_name: &str) -> String {
    format!(
        "InstanceType=OneSix\niconKey={}\nname={}\n",
        ICON_KEY, pack_name
    )
}

pub fn write_instance_descriptor(path: &Path, pack_name: &str) -> Result<(), ManifestError> {
    write_file(path, instance_descriptor(pack_name))?;
    info!(path = %path.display(), "instance descriptor written");
    Ok(())
}

/// Where the component pins came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinSource {
    /// Copied from the workdir
    Workdir,
    Builtin,
}

/// MultiMC component list for Forge 1.7.10 on LWJGL 2
pub fn builtin_component_pins() -> Value {
    json!({
        "components": [
            {
                "cachedName": "LWJGL 2",
                "cachedVersion": LWJGL_VERSION,
                "cachedVolatile": true,
                "dependencyOnly": true,
                "uid": "org.lwjgl",
                "version": LWJGL_VERSION
            },
            {
                "cachedName": "Minecraft",
                "cachedRequires": [
                    { "suggests": LWJGL_VERSION, "uid": "org.lwjgl" }
                ],
                "cachedVersion": GAME_VERSION,
                "important": true,
                "uid": "net.minecraft",
                "version": GAME_VERSION
            },
            {
                "cachedName": "Forge",
                "cachedRequires": [
                    { "equals": GAME_VERSION, "uid": "net.minecraft" }
                ],
                "cachedVersion": FORGE_VERSION,
                "uid": "net.minecraftforge",
                "version": FORGE_VERSION
            }
        ],
        "formatVersion": 1
    })
}

/// Copy `source` to `dest` verbatim, or write the built-in pins when it is missing
pub fn write_component_pins(source: &Path, dest: &Path) -> Result<PinSource, ManifestError> {
    if source.is_file() {
        let contents = std::fs::read(source).map_err(|source_err| ManifestError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        write_file(dest, contents)?;
        info!(from = %source.display(), to = %dest.display(), "component pins copied");
        return Ok(PinSource::Workdir);
    }

    let json = serde_json::to_string_pretty(&builtin_component_pins())?;
    write_file(dest, json)?;
    info!(to = %dest.display(), "built-in component pins written");
    Ok(PinSource::Builtin)
}

#[cfg(test)]
mod tests {
    include!("instance.test.rs");
}
