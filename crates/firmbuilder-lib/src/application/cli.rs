use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;
use super::env::EnvironmentConfig;

/// firmbuilder CLI - multi-launcher modpack builder
#[derive(Debug, Clone, Parser)]
#[command(name = "firmbuilder")]
#[command(about = "Build MultiMC, PolyMC, Technic, CurseForge and Modrinth packs from one pack.json")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// firmbuilder commands (default: build)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration: defaults -> .env -> env vars -> CLI args
    pub fn load() -> Result<Self, ConfigError> {
        super::loader::load_env_files()?;
        let environment = EnvironmentConfig::load()?;
        Self::from_cli(Cli::parse(), &environment)
    }

    /// Combine parsed arguments with the colour environment and validate
    pub fn from_cli(cli: Cli, environment: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let base = AppConfig {
            color: environment.apply_color_config(AppConfig::default().color),
            ..AppConfig::default()
        };
        let mut app_config = base.merge_with(cli.config);
        app_config.validate()?;

        Ok(Self {
            app_config,
            command: cli.command,
        })
    }

    /// The command to run; no subcommand means build
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }
}

/// Available firmbuilder commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Build every target archive for the pack
    Build {
        /// Remove previous build output, staged downloads and archives first
        #[arg(short, long)]
        clean: bool,
    },

    /// Remove build trees, staged downloads and archives
    Clean,

    /// Show version information
    Version,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Build { clean: false }
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            command: None,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
