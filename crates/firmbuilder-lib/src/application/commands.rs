//! Command execution handlers

use crate::application::session::{CommandSession, Session};
use crate::application::{CliConfig, Commands};
use anyhow::{Context, Result};
use tracing::info;

/// Execute CLI commands
pub async fn execute_command(config: CliConfig) -> Result<()> {
    let command = config.command();
    let session = CommandSession::new(config.app_config)?;

    execute_command_with_session(command, &session).await
}

/// Execute a specific command with a provided session (for testing)
pub async fn execute_command_with_session(command: Commands, session: &dyn Session) -> Result<()> {
    match command {
        Commands::Build { clean } => handle_build(session, clean).await,
        Commands::Clean => handle_clean(session),
        Commands::Version => handle_version(),
    }
}

async fn handle_build(session: &dyn Session, clean: bool) -> Result<()> {
    let orchestrator = session.orchestrator();

    if clean {
        orchestrator
            .clean()
            .context("Failed to clean build output")?;
    }

    let pack_path = session.config().app_config().pack_path();
    let results = orchestrator
        .execute_build_pipeline()
        .await
        .with_context(|| format!("Failed to build pack from {}", pack_path.display()))?;

    for result in &results {
        let size: u64 = result.artifacts.iter().map(|artifact| artifact.size).sum();
        info!(
            target = %result.target,
            path = %result.output_path.display(),
            size,
            "archive ready"
        );
    }

    Ok(())
}

fn handle_clean(session: &dyn Session) -> Result<()> {
    let removed = session
        .orchestrator()
        .clean()
        .context("Failed to clean build output")?;

    if removed.is_empty() {
        info!("nothing to clean");
    }
    Ok(())
}

fn handle_version() -> Result<()> {
    println!("firmbuilder {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
