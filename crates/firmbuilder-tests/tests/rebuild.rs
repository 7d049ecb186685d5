//! Rebuilding an unchanged pack reuses staged downloads and reproduces
//! the same archives byte for byte.

use anyhow::Result;
use firmbuilder_lib::application::{Commands, Session, execute_command_with_session};
use firmbuilder_tests::fixtures::{self, BOOTSTRAP_MODS, FORGE_UNIVERSAL, SHIM_REPOSITORY};
use firmbuilder_tests::scenarios::{HODGEPODGE, legacy_context, legacy_session};

fn staged_downloads() -> Vec<String> {
    vec![
        fixtures::modrinth_download_url(BOOTSTRAP_MODS[0], "mcinstanceloader-1.4.0.jar"),
        fixtures::modrinth_download_url(BOOTSTRAP_MODS[1], "unimixins-all-1.7.10-0.1.19.jar"),
        FORGE_UNIVERSAL.to_string(),
        fixtures::github_download_url(SHIM_REPOSITORY, "lwjgl3ify-2.1.5.jar"),
        fixtures::github_download_url(SHIM_REPOSITORY, "lwjgl3ify-2.1.5-multimc.zip"),
        fixtures::github_download_url(HODGEPODGE, "hodgepodge-2.5.0.jar"),
    ]
}

#[tokio::test]
async fn second_build_downloads_nothing() -> Result<()> {
    let (session, network, _env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;
    for url in staged_downloads() {
        assert_eq!(network.request_count(&url), 1, "first build fetches {}", url);
    }

    network.clear_requests();
    execute_command_with_session(Commands::default(), &session).await?;

    for url in staged_downloads() {
        assert_eq!(network.request_count(&url), 0, "second build refetched {}", url);
    }
    // Catalog lookups still happen; only artifact bodies are cached
    assert!(network.request_count(&fixtures::modrinth_versions_url(BOOTSTRAP_MODS[0], &legacy_context())) > 0);
    Ok(())
}

#[tokio::test]
async fn rebuild_produces_identical_archives() -> Result<()> {
    let (session, _network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;
    let first: Vec<Vec<u8>> = ["multimc", "polymc", "technic", "curse", "modrinth"]
        .iter()
        .map(|name| std::fs::read(env.path(&format!("out/{}.zip", name))))
        .collect::<Result<_, _>>()?;

    execute_command_with_session(Commands::default(), &session).await?;
    let second: Vec<Vec<u8>> = ["multimc", "polymc", "technic", "curse", "modrinth"]
        .iter()
        .map(|name| std::fs::read(env.path(&format!("out/{}.zip", name))))
        .collect::<Result<_, _>>()?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn corrupted_staged_file_is_redownloaded() -> Result<()> {
    let (session, network, env) = legacy_session()?;
    let url = fixtures::modrinth_download_url(BOOTSTRAP_MODS[0], "mcinstanceloader-1.4.0.jar");

    execute_command_with_session(Commands::default(), &session).await?;
    env.write_file("tmp/mcinstanceloader-1.4.0.jar", "truncated")?;
    network.clear_requests();

    execute_command_with_session(Commands::default(), &session).await?;

    assert_eq!(network.request_count(&url), 1);
    assert_eq!(
        env.read_to_string("bld/generic/.minecraft/mods/mcinstanceloader-1.4.0.jar")?,
        "instance loader"
    );
    Ok(())
}

#[tokio::test]
async fn clean_then_build_fetches_again() -> Result<()> {
    let (session, network, env) = legacy_session()?;

    execute_command_with_session(Commands::default(), &session).await?;
    network.clear_requests();

    execute_command_with_session(Commands::Build { clean: true }, &session).await?;

    assert_eq!(network.request_count(FORGE_UNIVERSAL), 1);
    assert!(env.exists("out/technic.zip"));
    assert!(session.orchestrator().layout().staging_dir.exists());
    Ok(())
}
