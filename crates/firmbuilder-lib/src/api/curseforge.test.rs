// Tests for the CurseForge client

use super::*;
use crate::testing::MockNetworkProvider;
use serde_json::json;

const BASE: &str = "https://cf.test";

fn context() -> LoaderContext {
    LoaderContext::new("forge", "1.7.10")
}

fn files_url(project_id: &str) -> String {
    CurseForgeClient::with_base_url(Arc::new(MockNetworkProvider::new()), BASE.to_string(), None)
        .files_url(project_id, &context())
}

fn listing() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": 4500200,
                "fileName": "journeymap-1.7.10-5.1.4.jar",
                "downloadUrl": "https://edge.test/files/4500/200/journeymap-1.7.10-5.1.4.jar",
                "fileLength": 1234,
                "hashes": [ { "value": "md5md5", "algo": 2 }, { "value": "sha1sha1", "algo": 1 } ]
            },
            {
                "id": 4500100,
                "fileName": "journeymap-1.7.10-5.1.3.jar",
                "downloadUrl": null,
                "fileLength": 1200,
                "hashes": []
            },
            {
                "id": 4500000,
                "fileName": "journeymap-1.7.10-5.1.2.jar",
                "downloadUrl": "https://edge.test/files/4500/0/journeymap-1.7.10-5.1.2.jar",
                "fileLength": 1100,
                "hashes": [ { "value": "onlymd5", "algo": 2 } ]
            }
        ]
    })
}

#[test]
fn test_files_url() {
    assert_eq!(
        files_url("32274"),
        "https://cf.test/v1/mods/32274/files?gameVersion=1%2E7%2E10&modLoaderType=forge"
    );
}

#[tokio::test]
async fn test_candidates_carry_file_id_and_sha1_only() {
    let mock = Arc::new(MockNetworkProvider::new().with_json(files_url("32274"), &listing()));
    let client = CurseForgeClient::with_base_url(mock, BASE.to_string(), None);

    let candidates = client.resolve("32274", &context()).await.unwrap();

    // An older entry without a download URL can never be chosen
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].provider_id.as_deref(), Some("4500200"));
    assert_eq!(candidates[0].hash, Some(ContentHash::sha1("sha1sha1")));
    assert_eq!(candidates[0].size, Some(1234));
    assert_eq!(candidates[1].hash, None);
}

#[tokio::test]
async fn test_api_key_header_sent_when_configured() {
    let mock = Arc::new(MockNetworkProvider::new().with_json(files_url("32274"), &listing()));
    let client =
        CurseForgeClient::with_base_url(mock.clone(), BASE.to_string(), Some("k3y".to_string()));

    client.resolve("32274", &context()).await.unwrap();

    let recorded = mock.recorded();
    assert!(
        recorded[0]
            .headers
            .contains(&("x-api-key".to_string(), "k3y".to_string()))
    );
}

#[tokio::test]
async fn test_no_api_key_header_by_default() {
    let mock = Arc::new(MockNetworkProvider::new().with_json(files_url("32274"), &listing()));
    let client = CurseForgeClient::with_base_url(mock.clone(), BASE.to_string(), None);

    client.resolve("32274", &context()).await.unwrap();

    assert!(mock.recorded()[0].headers.iter().all(|(name, _)| name != "x-api-key"));
}

#[tokio::test]
async fn test_newest_file_without_download_url_is_an_error() {
    let listing = json!({
        "data": [
            { "id": 999, "fileName": "new.jar", "downloadUrl": null, "fileLength": 2, "hashes": [] },
            { "id": 111, "fileName": "old.jar", "downloadUrl": "https://edge.test/old.jar", "fileLength": 1, "hashes": [] }
        ]
    });
    let mock = Arc::new(MockNetworkProvider::new().with_json(files_url("77"), &listing));
    let client = CurseForgeClient::with_base_url(mock, BASE.to_string(), None);

    let err = client.resolve("77", &context()).await.unwrap_err();

    // Never falls through to the older file
    match err {
        ProviderError::NoDownload {
            provider,
            project_id,
            file_id,
        } => {
            assert_eq!(provider, ProviderKind::CurseForge);
            assert_eq!(project_id, "77");
            assert_eq!(file_id, "999");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_only_file_without_download_url_is_not_treated_as_missing() {
    let listing = json!({
        "data": [ { "id": 999, "fileName": "new.jar", "downloadUrl": null, "fileLength": 2, "hashes": [] } ]
    });
    let mock = Arc::new(MockNetworkProvider::new().with_json(files_url("78"), &listing));
    let client = CurseForgeClient::with_base_url(mock, BASE.to_string(), None);

    let err = client.resolve("78", &context()).await.unwrap_err();
    assert!(matches!(err, ProviderError::NoDownload { .. }));
}

#[tokio::test]
async fn test_empty_data_is_not_found() {
    let mock = Arc::new(MockNetworkProvider::new().with_json(files_url("1"), &json!({ "data": [] })));
    let client = CurseForgeClient::with_base_url(mock, BASE.to_string(), None);

    assert!(client.resolve("1", &context()).await.unwrap().is_empty());
}
