//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::api::{ProviderEndpoints, curseforge, github, modrinth};
use crate::networking::NetworkingConfig;
use crate::primitives::*;
use clap::Parser;
use reqwest::Url;
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "2"; // info
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const LOG_FILE: &str = "builder.log";
    pub const COLOR: &str = "auto";
    pub const PACK_FILE: &str = "pack.json";
    // Some CurseForge-compatible proxies reject non-browser agents
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        2
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn log_file() -> PathBuf {
        PathBuf::from(defaults::LOG_FILE)
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn pack_file() -> PathBuf {
        PathBuf::from(defaults::PACK_FILE)
    }

    pub fn modrinth_base_url() -> String {
        modrinth::DEFAULT_BASE_URL.to_string()
    }

    pub fn curseforge_base_url() -> String {
        curseforge::DEFAULT_BASE_URL.to_string()
    }

    pub fn github_base_url() -> String {
        github::DEFAULT_BASE_URL.to_string()
    }

    pub fn user_agent() -> String {
        defaults::USER_AGENT.to_string()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Working directory holding pack.json and src/
    #[arg(short, long, env = "FIRMBUILDER_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Pack configuration file, relative to the working directory
    #[arg(short, long, env = "FIRMBUILDER_PACK_FILE", default_value = defaults::PACK_FILE)]
    #[serde(default = "default_fns::pack_file")]
    pub pack_file: PathBuf,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "FIRMBUILDER_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Console log format (text, pretty, json)
    #[arg(long, env = "FIRMBUILDER_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "FIRMBUILDER_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Plain-text log file, relative to the working directory
    #[arg(long, env = "FIRMBUILDER_LOG_FILE", default_value = defaults::LOG_FILE)]
    #[serde(default = "default_fns::log_file")]
    pub log_file: PathBuf,

    /// Do not write a log file
    #[arg(long, env = "FIRMBUILDER_NO_LOG_FILE")]
    #[serde(default)]
    pub no_log_file: bool,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "FIRMBUILDER_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Modrinth API root
    #[arg(long, env = "FIRMBUILDER_MODRINTH_URL", default_value = modrinth::DEFAULT_BASE_URL)]
    #[serde(default = "default_fns::modrinth_base_url")]
    pub modrinth_base_url: String,

    /// CurseForge-compatible API root
    #[arg(long, env = "FIRMBUILDER_CURSEFORGE_URL", default_value = curseforge::DEFAULT_BASE_URL)]
    #[serde(default = "default_fns::curseforge_base_url")]
    pub curseforge_base_url: String,

    /// GitHub API root
    #[arg(long, env = "FIRMBUILDER_GITHUB_URL", default_value = github::DEFAULT_BASE_URL)]
    #[serde(default = "default_fns::github_base_url")]
    pub github_base_url: String,

    /// CurseForge API key, sent as x-api-key
    #[arg(long, env = "FIRMBUILDER_KEY_CURSEFORGE", hide = true, hide_env_values = true)]
    #[serde(default)]
    pub curseforge_api_key: Option<String>,

    /// User-Agent sent with every request
    #[arg(long, env = "FIRMBUILDER_USER_AGENT", default_value = defaults::USER_AGENT)]
    #[serde(default = "default_fns::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (unset: wait indefinitely)
    #[arg(short = 't', long, env = "FIRMBUILDER_NET_TIMEOUT")]
    #[serde(default)]
    pub net_timeout: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            pack_file: default_fns::pack_file(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            log_file: default_fns::log_file(),
            no_log_file: false,
            color: default_fns::color(),
            modrinth_base_url: default_fns::modrinth_base_url(),
            curseforge_base_url: default_fns::curseforge_base_url(),
            github_base_url: default_fns::github_base_url(),
            curseforge_api_key: None,
            user_agent: default_fns::user_agent(),
            net_timeout: None,
        }
    }
}

impl AppConfig {
    /// Working directory, falling back to the current directory before validation
    pub fn workdir(&self) -> PathBuf {
        self.workdir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Pack file path resolved against the working directory
    pub fn pack_path(&self) -> PathBuf {
        self.workdir().join(&self.pack_file)
    }

    /// Create LoggerConfig from AppConfig
    ///
    /// `is_terminal` tells whether the chosen output stream is a terminal.
    pub fn to_logger_config(&self, is_terminal: bool) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            ansi: self.color.use_ansi(is_terminal),
            log_file: (!self.no_log_file).then(|| self.workdir().join(&self.log_file)),
        }
    }

    pub fn endpoints(&self) -> ProviderEndpoints {
        ProviderEndpoints {
            modrinth: self.modrinth_base_url.clone(),
            curseforge: self.curseforge_base_url.clone(),
            github: self.github_base_url.clone(),
            curseforge_api_key: self.curseforge_api_key.clone(),
        }
    }

    pub fn networking_config(&self) -> NetworkingConfig {
        NetworkingConfig {
            user_agent: self.user_agent.clone(),
            timeout_seconds: self.net_timeout,
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }
        if other.curseforge_api_key.is_some() {
            self.curseforge_api_key = other.curseforge_api_key;
        }
        if other.net_timeout.is_some() {
            self.net_timeout = other.net_timeout;
        }

        // For primitive fields, take other if it's not the default
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if other.pack_file != default_fns::pack_file() {
            self.pack_file = other.pack_file;
        }
        if other.log_file != default_fns::log_file() {
            self.log_file = other.log_file;
        }
        if other.no_log_file {
            self.no_log_file = true;
        }
        if other.modrinth_base_url != default_fns::modrinth_base_url() {
            self.modrinth_base_url = other.modrinth_base_url;
        }
        if other.curseforge_base_url != default_fns::curseforge_base_url() {
            self.curseforge_base_url = other.curseforge_base_url;
        }
        if other.github_base_url != default_fns::github_base_url() {
            self.github_base_url = other.github_base_url;
        }
        if other.user_agent != default_fns::user_agent() {
            self.user_agent = other.user_agent;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let workdir = match self.workdir.take() {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        if !workdir.is_dir() {
            return Err(ConfigError::InvalidWorkDir {
                path: workdir.display().to_string(),
            });
        }
        self.workdir = Some(workdir);

        if self.log_level > 4 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("log level {} is out of range 0-4", self.log_level),
            });
        }

        for (name, url) in [
            ("modrinth", &self.modrinth_base_url),
            ("curseforge", &self.curseforge_base_url),
            ("github", &self.github_base_url),
        ] {
            if Url::parse(url).is_err() {
                return Err(ConfigError::ValidationFailed {
                    reason: format!("{} API root '{}' is not a valid URL", name, url),
                });
            }
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "user agent must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
