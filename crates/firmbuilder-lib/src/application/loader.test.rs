use super::*;
use tempfile::TempDir;

#[test]
fn test_env_file_values_are_loaded() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".env");
    std::fs::write(&path, "FIRMBUILDER_LOADER_TEST_VALUE=from-file\n").unwrap();

    load_env_file(&path).unwrap();

    assert_eq!(
        std::env::var("FIRMBUILDER_LOADER_TEST_VALUE").as_deref(),
        Ok("from-file")
    );
}

#[test]
fn test_missing_env_file_is_an_error_when_named() {
    let temp = TempDir::new().unwrap();
    let result = load_env_file(&temp.path().join("absent.env"));
    assert!(matches!(result, Err(ConfigError::EnvFileError { .. })));
}

#[test]
fn test_malformed_env_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".env");
    std::fs::write(&path, "NOT VALID LINE WITH 'UNCLOSED\n").unwrap();

    assert!(load_env_file(&path).is_err());
}
