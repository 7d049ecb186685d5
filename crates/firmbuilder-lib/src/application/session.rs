//! Command session architecture
//!
//! Each command execution creates a session that owns its configuration
//! and the network provider every build component shares.

use crate::application::config::AppConfig;
use crate::logger::Logger;
use crate::networking::{NetworkProvider, NetworkingManager};
use crate::pack::BuildOrchestrator;
use crate::primitives::{LogOutput, LoggerError};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::sync::Arc;

/// Provider trait for configuration access
pub trait ConfigProvider: Send + Sync {
    /// Get application configuration
    fn app_config(&self) -> &AppConfig;
}

/// Everything a command handler needs
pub trait Session {
    fn config(&self) -> &dyn ConfigProvider;

    /// Shared network provider
    fn network(&self) -> Arc<dyn NetworkProvider>;

    /// Build orchestrator for the configured working directory
    fn orchestrator(&self) -> BuildOrchestrator {
        let config = self.config().app_config();
        BuildOrchestrator::new(
            config.workdir(),
            config.pack_path(),
            self.network(),
            config.endpoints(),
        )
    }
}

/// Live implementation of ConfigProvider
pub struct LiveConfigProvider {
    app_config: AppConfig,
}

impl LiveConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for LiveConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// CommandSession owns all ephemeral state for a single command execution
pub struct CommandSession<C: ConfigProvider> {
    config_provider: C,
    network_provider: Arc<dyn NetworkProvider>,
}

impl CommandSession<LiveConfigProvider> {
    /// Production composition: initializes logging and the HTTP client
    pub fn new(app_config: AppConfig) -> Result<Self> {
        let is_terminal = match app_config.log_output {
            LogOutput::Stderr => std::io::stderr().is_terminal(),
            LogOutput::Stdout => std::io::stdout().is_terminal(),
        };
        match Logger::init(app_config.to_logger_config(is_terminal)) {
            Ok(_) | Err(LoggerError::AlreadyInitialized) => {}
            Err(e) => return Err(e).context("Failed to initialize logging"),
        }

        let network = NetworkingManager::new(app_config.networking_config())
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config_provider: LiveConfigProvider::new(app_config),
            network_provider: Arc::new(network),
        })
    }
}

impl<C: ConfigProvider> CommandSession<C> {
    /// Create a session with custom providers (for testing)
    #[cfg(any(test, feature = "test-utils"))]
    pub fn new_with_providers(config_provider: C, network_provider: Arc<dyn NetworkProvider>) -> Self {
        Self {
            config_provider,
            network_provider,
        }
    }
}

impl<C: ConfigProvider> Session for CommandSession<C> {
    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }

    fn network(&self) -> Arc<dyn NetworkProvider> {
        self.network_provider.clone()
    }
}
