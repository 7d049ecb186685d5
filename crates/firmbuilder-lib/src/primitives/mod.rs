//! firmbuilder primitives - core types, errors, and coordination
//!
//! Shared types that the rest of the crate builds on: logging enums that
//! double as CLI values, configuration and logger errors, and the provider
//! kind enumeration used by pack references and provider clients.

use clap::ValueEnum;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

// Shared macros and patterns
mod shared;
use shared::value_enum_from_str;

/// Artifact provider kinds (where a mod reference is resolved)
pub mod provider;
pub use provider::*;

/// Stream the console log is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stderr,
    Stdout,
}

/// Verbosity, ordered from quietest to loudest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[value(alias = "err", alias = "fatal")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warning,
    #[value(alias = "information")]
    Info,
    #[value(alias = "debugging")]
    Debug,
    #[value(alias = "verbose")]
    Trace,
}

/// Console log rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One line per event
    #[value(alias = "txt", alias = "plain")]
    Text,
    /// Multi-line, human oriented
    Pretty,
    /// Newline-delimited JSON objects
    Json,
}

/// Colour output intent requested by the user or the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorIntent {
    /// Colour when writing to a terminal
    Auto,
    #[value(alias = "yes", alias = "force")]
    Always,
    #[value(alias = "no", alias = "none")]
    Never,
}

impl ColorIntent {
    /// Resolve the intent against whether the output is a terminal
    pub fn use_ansi(&self, is_terminal: bool) -> bool {
        match self {
            ColorIntent::Auto => is_terminal,
            ColorIntent::Always => true,
            ColorIntent::Never => false,
        }
    }
}

// ============================================================================
// LOGGER CONFIGURATION TYPES
// ============================================================================

/// Logger configuration derived from the application config
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub ansi: bool,
    /// Plain-text copy of the log, appended to this file when set
    pub log_file: Option<PathBuf>,
}

// ============================================================================
// STRUCTURED ERROR TYPES
// ============================================================================

/// Application configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load environment file '{file}': {source}")]
    EnvFileError {
        file: String,
        source: dotenvy::Error,
    },

    #[error("Invalid working directory: {path}")]
    InvalidWorkDir { path: String },

    #[error("Failed to parse environment variables: {source}")]
    EnvironmentParsingFailed {
        #[from]
        source: envy::Error,
    },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to get current directory: {source}")]
    CurrentDirError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration value '{value}': {reason}")]
    ParseError { value: String, reason: String },
}

/// Logger initialization and operation errors
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to initialize tracing subscriber: {reason}")]
    InitializationFailed { reason: String },

    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Failed to open log file '{path}': {source}")]
    LogFileError {
        path: String,
        source: std::io::Error,
    },
}

impl LogLevel {
    /// Convert verbosity level from AppConfig to LogLevel
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Error,
            1 => LogLevel::Warning,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            4.. => LogLevel::Trace,
        }
    }

    /// Filter directive used by the tracing subscriber
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

value_enum_from_str! {
    LogLevel => "log level",
    LogFormat => "log format",
    LogOutput => "log output stream",
    ColorIntent => "color intent",
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
