//! `.env` file loading
//!
//! Files are read before the command line is parsed so their values reach
//! clap through the `FIRMBUILDER_*` environment variables. Variables already
//! set in the process environment are not overridden.

use crate::primitives::ConfigError;
use std::path::PathBuf;

/// Env files in load order; earlier files win
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load every env file that exists, returning the paths loaded
///
/// A missing file is skipped; an unreadable or malformed one is an error.
pub fn load_env_files() -> Result<Vec<PathBuf>, ConfigError> {
    let mut loaded = Vec::new();

    for env_file in ENV_FILES {
        match dotenvy::from_filename(env_file) {
            Ok(path) => loaded.push(path),
            Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source,
                });
            }
        }
    }

    Ok(loaded)
}

/// Load one env file by path
pub fn load_env_file(path: &std::path::Path) -> Result<(), ConfigError> {
    dotenvy::from_path(path).map_err(|source| ConfigError::EnvFileError {
        file: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
