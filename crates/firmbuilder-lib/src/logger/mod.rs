use crate::primitives::*;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger implementation using tracing with indicatif progress integration
#[derive(Debug)]
pub struct Logger {
    log_file: Option<std::path::PathBuf>,
}

impl Logger {
    /// Initialize the global logger
    ///
    /// Console output goes through the indicatif writers so progress bars
    /// are never torn by log lines. When `log_file` is set, a second plain
    /// text layer appends every event to that file.
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        let indicatif_layer = IndicatifLayer::new();

        // RUST_LOG wins over the configured level
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter_directive(config.level)));

        let console = match config.output {
            LogOutput::Stderr => BoxMakeWriter::new(indicatif_layer.get_stderr_writer()),
            LogOutput::Stdout => BoxMakeWriter::new(indicatif_layer.get_stdout_writer()),
        };
        let console_layer = fmt::layer().with_writer(console);
        let console_layer = match config.format {
            LogFormat::Text => console_layer.with_ansi(config.ansi).compact().boxed(),
            LogFormat::Pretty => console_layer.with_ansi(config.ansi).pretty().boxed(),
            // JSON consumers never want escape codes
            LogFormat::Json => console_layer.with_ansi(false).json().boxed(),
        };

        let file_layer = match &config.log_file {
            Some(path) => Some(
                fmt::layer()
                    .with_writer(Mutex::new(open_log_file(path)?))
                    .with_ansi(false)
                    .with_target(false),
            ),
            None => None,
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .with(indicatif_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        let logger = Logger {
            log_file: config.log_file.clone(),
        };

        GLOBAL_LOGGER
            .set(logger)
            .map_err(|_| LoggerError::AlreadyInitialized)?;

        tracing::debug!(
            level = ?config.level,
            format = ?config.format,
            output = ?config.output,
            log_file = ?config.log_file,
            "Logger initialized"
        );

        GLOBAL_LOGGER
            .get()
            .ok_or_else(|| LoggerError::InitializationFailed {
                reason: "global logger missing after set".to_string(),
            })
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    /// Check if logger is initialized
    pub fn is_initialized() -> bool {
        GLOBAL_LOGGER.get().is_some()
    }

    /// File receiving the plain text log, if any
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// Default filter: our crates at the requested level, HTTP plumbing at warn
pub fn filter_directive(level: LogLevel) -> String {
    let level = level.as_filter();
    format!(
        "firmbuilder_lib={level},firmbuilder={level},hyper_util=warn,reqwest=warn,h2=warn,rustls=warn,tokio=warn,mio=warn,want=warn,{level}"
    )
}

/// Open (or create) the log file in append mode
pub fn open_log_file(path: &Path) -> Result<File, LoggerError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggerError::LogFileError {
            path: path.display().to_string(),
            source,
        })
}

/// Create a span for operations that should show progress bars
#[macro_export]
macro_rules! progress_span {
    ($operation:expr) => {
        tracing::info_span!("progress", operation = $operation)
    };
    ($operation:expr, total = $total:expr) => {
        tracing::info_span!("progress", operation = $operation, total = $total)
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
