//! # firmbuilder Library
//!
//! Builds one modpack for several launchers from a single `pack.json`.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared enums
//! - [`logger`] - Structured logging with progress tracking
//! - [`networking`] - HTTP client and the download fetcher
//! - [`api`] - Modrinth, CurseForge, GitHub and direct-URL providers
//! - [`pack`] - Resolution, target trees, manifests and archives
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! firmbuilder_lib::main().await
//! # }
//! ```

pub mod api;
pub mod application;
pub mod logger;
pub mod networking;
pub mod pack;
pub mod primitives;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use logger::Logger;
pub use networking::{Fetcher, NetworkProvider, NetworkingConfig, NetworkingManager};
pub use pack::{BuildOrchestrator, BuildResult, PackSpec, Target};
pub use primitives::{
    ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError, ProviderKind,
};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
