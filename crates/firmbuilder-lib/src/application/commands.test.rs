use super::*;
use crate::application::session::LiveConfigProvider;
use crate::application::AppConfig;
use crate::testing::{MockNetworkProvider, TempDirFixture};
use std::sync::Arc;

const PACK: &str = r#"{
    "name": "Plain",
    "loader": "quilt",
    "version": "0.1.0",
    "mcv": "1.20.1",
    "mods": [
        { "name": "Raw", "type": "url", "projectid": "https://files.test/raw.jar" }
    ]
}"#;

fn session(fixture: &TempDirFixture, network: MockNetworkProvider) -> CommandSession<LiveConfigProvider> {
    let config = AppConfig {
        workdir: Some(fixture.path().to_path_buf()),
        ..AppConfig::default()
    };
    CommandSession::new_with_providers(LiveConfigProvider::new(config), Arc::new(network))
}

#[tokio::test]
async fn test_version_command() {
    let fixture = TempDirFixture::new().unwrap();
    let session = session(&fixture, MockNetworkProvider::new());

    execute_command_with_session(Commands::Version, &session)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_build_command_writes_archive() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("pack.json", PACK).unwrap();
    let session = session(&fixture, MockNetworkProvider::new());

    execute_command_with_session(Commands::default(), &session)
        .await
        .unwrap();

    assert!(fixture.file_exists("out/modrinth.zip"));
    assert!(!fixture.file_exists("out/multimc.zip"));
}

#[tokio::test]
async fn test_build_with_clean_drops_staged_downloads() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("pack.json", PACK).unwrap();
    fixture.write_file("tmp/stale.jar", "old").unwrap();
    let session = session(&fixture, MockNetworkProvider::new());

    execute_command_with_session(Commands::Build { clean: true }, &session)
        .await
        .unwrap();

    assert!(!fixture.file_exists("tmp/stale.jar"));
    assert!(fixture.file_exists("out/modrinth.zip"));
}

#[tokio::test]
async fn test_build_without_pack_file_fails_with_context() {
    let fixture = TempDirFixture::new().unwrap();
    let session = session(&fixture, MockNetworkProvider::new());

    let error = execute_command_with_session(Commands::default(), &session)
        .await
        .unwrap_err();

    assert!(error.to_string().contains("Failed to build pack"));
}

#[tokio::test]
async fn test_clean_command() {
    let fixture = TempDirFixture::new().unwrap();
    fixture.write_file("out/modrinth.zip", "zip").unwrap();
    let session = session(&fixture, MockNetworkProvider::new());

    execute_command_with_session(Commands::Clean, &session)
        .await
        .unwrap();

    assert!(!fixture.file_exists("out"));
}
