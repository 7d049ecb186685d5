use super::*;
use crate::testing::MockNetworkProvider;
use serde_json::json;

#[test]
fn test_default_endpoints() {
    let endpoints = ProviderEndpoints::default();

    assert_eq!(endpoints.modrinth, "https://api.modrinth.com");
    assert_eq!(endpoints.curseforge, "http://api-pocket.com");
    assert_eq!(endpoints.github, "https://api.github.com");
    assert!(endpoints.curseforge_api_key.is_none());
}

#[test]
fn test_standard_registry_covers_every_kind() {
    let registry = ProviderRegistry::standard(
        Arc::new(MockNetworkProvider::new()),
        &ProviderEndpoints::default(),
        None,
    );

    for kind in ProviderKind::ALL {
        assert_eq!(registry.get(kind).unwrap().kind(), kind);
    }
}

#[tokio::test]
async fn test_empty_registry_reports_unsupported() {
    let registry = ProviderRegistry::new();
    let err = registry
        .resolve(ProviderKind::Url, "https://x.test/a.jar", &LoaderContext::new("forge", "1.7.10"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Unsupported {
            provider: ProviderKind::Url
        }
    ));
}

#[tokio::test]
async fn test_registry_dispatches_by_kind() {
    let endpoints = ProviderEndpoints {
        modrinth: "https://mr.test".to_string(),
        ..ProviderEndpoints::default()
    };
    let context = LoaderContext::new("fabric", "1.12.2");
    let url = ModrinthClient::with_base_url(Arc::new(MockNetworkProvider::new()), endpoints.modrinth.clone())
        .versions_url("P", &context);
    let mock = Arc::new(MockNetworkProvider::new().with_json(
        url.clone(),
        &json!([{ "id": "v", "files": [ { "filename": "p.jar", "url": "https://cdn.test/p.jar", "hashes": {}, "size": 1 } ] }]),
    ));
    let registry = ProviderRegistry::standard(mock.clone(), &endpoints, None);

    let candidates = registry
        .resolve(ProviderKind::Modrinth, "P", &context)
        .await
        .unwrap();

    assert_eq!(candidates[0].filename, "p.jar");
    assert_eq!(mock.requests(), vec![url]);
}
