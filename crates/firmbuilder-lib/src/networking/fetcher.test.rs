use super::*;
use crate::testing::MockNetworkProvider;
use tempfile::TempDir;

const URL: &str = "https://cdn.test/mods/example.jar";

fn sha1_of(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

fn fetcher_with(mock: Arc<MockNetworkProvider>, staging: &Path) -> Fetcher {
    Fetcher::new(mock, staging.to_path_buf())
}

#[tokio::test]
async fn test_fetch_downloads_missing_file() {
    let temp = TempDir::new().unwrap();
    let mock = Arc::new(MockNetworkProvider::new().with_body(URL, "jar-v2"));
    let fetcher = fetcher_with(mock.clone(), temp.path());

    let dest = temp.path().join("nested/example.jar");
    let outcome = fetcher.fetch(URL, &dest, None).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 6 });
    assert_eq!(std::fs::read(&dest).unwrap(), b"jar-v2");
    assert_eq!(mock.request_count(URL), 1);
}

#[tokio::test]
async fn test_fetch_skips_existing_file_without_hash() {
    let temp = TempDir::new().unwrap();
    let mock = Arc::new(MockNetworkProvider::new().with_body(URL, "jar-v2"));
    let fetcher = fetcher_with(mock.clone(), temp.path());

    let dest = temp.path().join("example.jar");
    std::fs::write(&dest, b"whatever was there").unwrap();

    let outcome = fetcher.fetch(URL, &dest, None).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Skipped);
    assert!(mock.requests().is_empty());
    assert_eq!(std::fs::read(&dest).unwrap(), b"whatever was there");
}

#[tokio::test]
async fn test_fetch_skips_existing_file_with_matching_hash() {
    let temp = TempDir::new().unwrap();
    let mock = Arc::new(MockNetworkProvider::new().with_body(URL, "jar-v2"));
    let fetcher = fetcher_with(mock.clone(), temp.path());

    let dest = temp.path().join("example.jar");
    std::fs::write(&dest, b"jar-v2").unwrap();

    let expected = ContentHash::sha1(sha1_of(b"jar-v2").to_uppercase());
    let outcome = fetcher.fetch(URL, &dest, Some(&expected)).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Skipped);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_fetch_replaces_stale_file() {
    let temp = TempDir::new().unwrap();
    let mock = Arc::new(MockNetworkProvider::new().with_body(URL, "jar-v2"));
    let fetcher = fetcher_with(mock.clone(), temp.path());

    let dest = temp.path().join("example.jar");
    std::fs::write(&dest, b"jar-v1 truncated").unwrap();

    let expected = ContentHash::sha1(sha1_of(b"jar-v2"));
    let outcome = fetcher.fetch(URL, &dest, Some(&expected)).await.unwrap();

    assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 6 });
    assert_eq!(std::fs::read(&dest).unwrap(), b"jar-v2");
    assert_eq!(mock.request_count(URL), 1);
}

#[tokio::test]
async fn test_fetch_rejects_wrong_download() {
    let temp = TempDir::new().unwrap();
    let mock = Arc::new(MockNetworkProvider::new().with_body(URL, "tampered"));
    let fetcher = fetcher_with(mock, temp.path());

    let dest = temp.path().join("example.jar");
    let expected = ContentHash::sha1(sha1_of(b"jar-v2"));
    let err = fetcher.fetch(URL, &dest, Some(&expected)).await.unwrap_err();

    assert!(matches!(err, FetchError::HashMismatch { .. }));
    assert!(!dest.exists());
}

#[tokio::test]
async fn test_rejected_download_is_not_served_from_cache_later() {
    let temp = TempDir::new().unwrap();
    let mock = Arc::new(MockNetworkProvider::new().with_body(URL, "tampered"));
    let fetcher = fetcher_with(mock.clone(), temp.path());

    let dest = temp.path().join("example.jar");
    std::fs::write(&dest, b"jar-v1 truncated").unwrap();
    let expected = ContentHash::sha1(sha1_of(b"jar-v2"));
    fetcher.fetch(URL, &dest, Some(&expected)).await.unwrap_err();

    // Neither the stale file nor the rejected body survives
    assert!(!dest.exists());

    let outcome = fetcher.fetch(URL, &dest, None).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 8 });
    assert_eq!(mock.request_count(URL), 2);
}

#[tokio::test]
async fn test_fetch_propagates_transport_failure() {
    let temp = TempDir::new().unwrap();
    let mock = Arc::new(MockNetworkProvider::new().with_status(URL, 500));
    let fetcher = fetcher_with(mock, temp.path());

    let err = fetcher
        .fetch(URL, &temp.path().join("example.jar"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Network { .. }));
    assert!(!temp.path().join("example.jar").exists());
}

#[tokio::test]
async fn test_stage_writes_into_staging_dir() {
    let temp = TempDir::new().unwrap();
    let staging = temp.path().join("tmp");
    let mock = Arc::new(MockNetworkProvider::new().with_body(URL, "jar-v2"));
    let fetcher = fetcher_with(mock, &staging);

    let staged = fetcher.stage(URL, "example.jar", None).await.unwrap();

    assert_eq!(staged, staging.join("example.jar"));
    assert_eq!(fetcher.staging_dir(), staging.as_path());
    assert!(staged.is_file());
}

#[test]
fn test_hash_file_known_digests() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hello.txt");
    std::fs::write(&path, b"hello").unwrap();

    assert_eq!(
        Fetcher::hash_file(&path, HashAlgorithm::Sha1).unwrap(),
        "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d"
    );
    assert_eq!(
        Fetcher::hash_file(&path, HashAlgorithm::Md5).unwrap(),
        "5d41402abc4b2a76b9719d911017c592"
    );
}

#[test]
fn test_hash_file_missing_is_io_error() {
    let temp = TempDir::new().unwrap();
    let err = Fetcher::hash_file(&temp.path().join("nope"), HashAlgorithm::Md5).unwrap_err();
    assert!(matches!(err, FetchError::Io { .. }));
}

#[test]
fn test_content_hash_display() {
    assert_eq!(ContentHash::md5("abc").to_string(), "md5:abc");
    assert!(ContentHash::sha1("ABC").matches("abc"));
}
