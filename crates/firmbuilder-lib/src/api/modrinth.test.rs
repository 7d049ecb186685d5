// Tests for the Modrinth client

use super::*;
use crate::networking::{NetworkingConfig, NetworkingManager};
use crate::testing::MockNetworkProvider;
use mockito::{Matcher, Server};
use serde_json::json;

const BASE: &str = "https://modrinth.test";

fn client(mock: &Arc<MockNetworkProvider>) -> ModrinthClient {
    ModrinthClient::with_base_url(mock.clone(), BASE.to_string())
}

fn url_for(project_id: &str, context: &LoaderContext) -> String {
    client(&Arc::new(MockNetworkProvider::new())).versions_url(project_id, context)
}

#[test]
fn test_versions_url_encodes_filters() {
    let mock = Arc::new(MockNetworkProvider::new());
    let url = client(&mock).versions_url("cUtsYbG5", &LoaderContext::new("fabric", "1.12.2"));

    assert_eq!(
        url,
        "https://modrinth.test/v2/project/cUtsYbG5/version?game_versions=%5B%221%2E12%2E2%22%5D&loaders=%5B%22fabric%22%5D"
    );
}

#[tokio::test]
async fn test_first_file_of_each_version_newest_first() {
    let context = LoaderContext::new("fabric", "1.12.2");
    let mock = Arc::new(MockNetworkProvider::new().with_json(
        url_for("cUtsYbG5", &context),
        &json!([
            {
                "id": "v2",
                "files": [
                    { "filename": "x.jar", "url": "https://cdn.test/x.jar", "hashes": { "sha1": "abc123" }, "size": 42 },
                    { "filename": "x-sources.jar", "url": "https://cdn.test/x-sources.jar", "hashes": { "sha1": "fff" }, "size": 7 }
                ]
            },
            { "id": "v1", "files": [ { "filename": "x-old.jar", "url": "https://cdn.test/x-old.jar", "hashes": {}, "size": 40 } ] },
            { "id": "empty", "files": [] }
        ]),
    ));

    let candidates = client(&mock).resolve("cUtsYbG5", &context).await.unwrap();

    assert_eq!(candidates.len(), 2);
    let first = &candidates[0];
    assert_eq!(first.provider_id.as_deref(), Some("v2"));
    assert_eq!(first.filename, "x.jar");
    assert_eq!(first.hash, Some(ContentHash::sha1("abc123")));
    assert_eq!(first.size, Some(42));
    assert_eq!(candidates[1].hash, None);
}

#[tokio::test]
async fn test_newest_version_without_files_is_an_error() {
    let context = LoaderContext::new("fabric", "1.12.2");
    let mock = Arc::new(MockNetworkProvider::new().with_json(
        url_for("cUtsYbG5", &context),
        &json!([
            { "id": "v3", "files": [] },
            { "id": "v2", "files": [ { "filename": "x.jar", "url": "https://cdn.test/x.jar", "hashes": {}, "size": 42 } ] }
        ]),
    ));

    let err = client(&mock).resolve("cUtsYbG5", &context).await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::NoDownload {
            provider: ProviderKind::Modrinth,
            ref file_id,
            ..
        } if file_id == "v3"
    ));
}

#[tokio::test]
async fn test_empty_listing_is_not_an_error() {
    let context = LoaderContext::new("forge", "1.7.10");
    let mock = Arc::new(MockNetworkProvider::new().with_body(url_for("gone", &context), "[]"));

    let candidates = client(&mock).resolve("gone", &context).await.unwrap();
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_fatal() {
    let context = LoaderContext::new("forge", "1.7.10");
    let mock = Arc::new(
        MockNetworkProvider::new().with_body(url_for("broken", &context), "<html>rate limited</html>"),
    );

    let err = client(&mock).resolve("broken", &context).await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_transport_failure_is_fatal() {
    let context = LoaderContext::new("forge", "1.7.10");
    let mock = Arc::new(MockNetworkProvider::new());

    let err = client(&mock).resolve("unrouted", &context).await.unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Network {
            provider: ProviderKind::Modrinth,
            ..
        }
    ));
}

#[tokio::test]
async fn test_live_client_against_mock_server() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/project/cUtsYbG5/version")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("game_versions".to_string(), "[\"1.12.2\"]".to_string()),
            Matcher::UrlEncoded("loaders".to_string(), "[\"fabric\"]".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([{ "id": "abc", "files": [ { "filename": "x.jar", "url": "https://cdn.test/x.jar", "hashes": { "sha1": "abc123" }, "size": 42 } ] }])
                .to_string(),
        )
        .create_async()
        .await;

    let networking = NetworkingManager::new(NetworkingConfig::default()).unwrap();
    let client = ModrinthClient::with_base_url(Arc::new(networking), server.url());

    let candidates = client
        .resolve("cUtsYbG5", &LoaderContext::new("fabric", "1.12.2"))
        .await
        .unwrap();

    assert_eq!(candidates[0].filename, "x.jar");
    mock.assert_async().await;
}
