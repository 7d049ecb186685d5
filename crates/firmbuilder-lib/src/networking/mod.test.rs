use super::*;
use mockito::Server;

fn manager(user_agent: &str) -> NetworkingManager {
    NetworkingManager::new(NetworkingConfig {
        user_agent: user_agent.to_string(),
        timeout_seconds: Some(10),
    })
    .unwrap()
}

#[tokio::test]
async fn test_get_bytes_sends_user_agent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/files/a.jar")
        .match_header("user-agent", "firmbuilder-test/1.0")
        .with_status(200)
        .with_body("jar bytes")
        .create_async()
        .await;

    let manager = manager("firmbuilder-test/1.0");
    let url = format!("{}/files/a.jar", server.url());
    let body = manager.get_bytes(&url, &[]).await.unwrap();

    assert_eq!(body, b"jar bytes");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_bytes_forwards_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v1/mods/1/files")
        .match_header("x-api-key", "secret")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let manager = manager("ua");
    let url = format!("{}/v1/mods/1/files", server.url());
    let headers = vec![("x-api-key".to_string(), "secret".to_string())];
    manager.get_bytes(&url, &headers).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_bytes_not_found() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;

    let manager = manager("ua");
    let url = format!("{}/missing", server.url());
    let err = manager.get_bytes(&url, &[]).await.unwrap_err();

    assert!(matches!(err, NetworkingError::HttpStatus { status: 404, .. }));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_get_bytes_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/boom")
        .with_status(500)
        .create_async()
        .await;

    let manager = manager("ua");
    let url = format!("{}/boom", server.url());
    let err = manager.get_bytes(&url, &[]).await.unwrap_err();

    assert!(matches!(err, NetworkingError::HttpStatus { status: 500, .. }));
}

#[test]
fn test_default_config_has_no_timeout() {
    let config = NetworkingConfig::default();
    assert!(config.timeout_seconds.is_none());
    assert!(config.user_agent.starts_with("Mozilla/5.0"));
}
