// Tests for the GitHub releases client

use super::*;
use crate::testing::MockNetworkProvider;
use serde_json::json;
use tempfile::TempDir;

const BASE: &str = "https://gh.test";
const ASSETS: &str = "https://gh.test/repos/GTNewHorizons/lwjgl3ify/releases/100/assets";

fn asset(name: &str) -> Asset {
    Asset {
        name: name.to_string(),
        browser_download_url: format!("https://dl.test/{}", name),
    }
}

fn release_mock(assets: serde_json::Value) -> MockNetworkProvider {
    MockNetworkProvider::new()
        .with_json(
            "https://gh.test/repos/GTNewHorizons/lwjgl3ify/releases",
            &json!([{ "assets_url": ASSETS }, { "assets_url": "https://gh.test/older" }]),
        )
        .with_json(ASSETS, &assets)
}

#[test]
fn test_excluded_markers_case_insensitive() {
    for name in [
        "mod-1.0-dev.jar",
        "mod-1.0-API.jar",
        "mod-1.0-Sources.jar",
        "mod-1.0-patch.jar",
        "mod-1.0-DEBUG.jar",
        "mod-1.0-javaagent.jar",
    ] {
        assert!(is_excluded(name), "{} should be excluded", name);
    }
    assert!(!is_excluded("lwjgl3ify-1.5.0.jar"));
}

#[test]
fn test_select_assets_last_primary_wins() {
    let selection = select_assets(&[
        asset("first-1.0.jar"),
        asset("first-1.0-dev.jar"),
        asset("second-1.0.jar"),
        asset("lwjgl3ify-1.0-multimc.zip"),
        asset("third-1.0-sources.jar"),
    ]);

    assert_eq!(selection.primary, Some(asset("second-1.0.jar")));
    assert_eq!(selection.companion, Some(asset("lwjgl3ify-1.0-multimc.zip")));
}

#[test]
fn test_select_assets_last_companion_wins() {
    let selection = select_assets(&[asset("a-multimc.zip"), asset("b-MultiMC.zip")]);

    assert_eq!(selection.companion, Some(asset("b-MultiMC.zip")));
    assert_eq!(selection.primary, None);
}

#[test]
fn test_select_assets_excluded_companion_is_dropped() {
    // Exclusion is checked before the companion marker
    let selection = select_assets(&[asset("x-multimc-debug.zip"), asset("x.jar")]);

    assert_eq!(selection.companion, None);
    assert_eq!(selection.primary, Some(asset("x.jar")));
}

#[tokio::test]
async fn test_resolve_uses_latest_release() {
    let mock = Arc::new(release_mock(json!([
        { "name": "lwjgl3ify-2.0.jar", "browser_download_url": "https://dl.test/lwjgl3ify-2.0.jar" },
        { "name": "lwjgl3ify-2.0-multimc.zip", "browser_download_url": "https://dl.test/lwjgl3ify-2.0-multimc.zip" },
        { "name": "lwjgl3ify-2.0-forgePatches.jar", "browser_download_url": "https://dl.test/lwjgl3ify-2.0-forgePatches.jar" }
    ])));
    let client = GithubClient::with_base_url(mock.clone(), BASE.to_string());

    let candidates = client
        .resolve("GTNewHorizons/lwjgl3ify", &LoaderContext::new("forge", "1.7.10"))
        .await
        .unwrap();

    assert_eq!(candidates.len(), 1);
    let candidate = &candidates[0];
    assert_eq!(candidate.filename, "lwjgl3ify-2.0.jar");
    assert_eq!(
        candidate.companion_url.as_deref(),
        Some("https://dl.test/lwjgl3ify-2.0-multimc.zip")
    );
    assert_eq!(candidate.hash, None);
    assert_eq!(mock.request_count("https://gh.test/older"), 0);
}

#[tokio::test]
async fn test_no_releases_is_not_found() {
    let mock = Arc::new(
        MockNetworkProvider::new().with_json("https://gh.test/repos/owner/empty/releases", &json!([])),
    );
    let client = GithubClient::with_base_url(mock, BASE.to_string());

    let candidates = client
        .resolve("owner/empty", &LoaderContext::new("forge", "1.7.10"))
        .await
        .unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_hashing_stages_asset_and_records_md5() {
    let temp = TempDir::new().unwrap();
    let mock = Arc::new(
        release_mock(json!([
            { "name": "lwjgl3ify-2.0.jar", "browser_download_url": "https://dl.test/lwjgl3ify-2.0.jar" }
        ]))
        .with_body("https://dl.test/lwjgl3ify-2.0.jar", "hello"),
    );
    let fetcher = Arc::new(Fetcher::new(mock.clone(), temp.path().to_path_buf()));
    let client = GithubClient::with_base_url(mock.clone(), BASE.to_string()).with_hashing(fetcher);

    let candidates = client
        .resolve("GTNewHorizons/lwjgl3ify", &LoaderContext::new("forge", "1.7.10"))
        .await
        .unwrap();

    assert_eq!(
        candidates[0].hash,
        Some(ContentHash::md5("5d41402abc4b2a76b9719d911017c592"))
    );
    assert!(temp.path().join("lwjgl3ify-2.0.jar").is_file());
}
