use super::*;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 2);
    assert_eq!(config.pack_file, PathBuf::from("pack.json"));
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.net_timeout, None);
    assert!(config.user_agent.starts_with("Mozilla/5.0"));
    assert_eq!(config.modrinth_base_url, "https://api.modrinth.com");
}

#[test]
fn test_config_merging() {
    let base = AppConfig {
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    let override_config = AppConfig {
        log_level: 4,
        net_timeout: Some(10),
        github_base_url: "http://mirror.test".to_string(),
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.net_timeout, Some(10));
    assert_eq!(merged.github_base_url, "http://mirror.test");
    // Defaults in `other` do not clobber explicit base values
    assert_eq!(merged.color, ColorIntent::Never);
    assert_eq!(merged.modrinth_base_url, "https://api.modrinth.com");
}

#[test]
fn test_paths_resolve_against_workdir() {
    let config = AppConfig {
        workdir: Some(PathBuf::from("/packs/sky")),
        ..AppConfig::default()
    };

    assert_eq!(config.pack_path(), PathBuf::from("/packs/sky/pack.json"));
    assert_eq!(
        config.to_logger_config(false).log_file,
        Some(PathBuf::from("/packs/sky/builder.log"))
    );
}

#[test]
fn test_logger_config_mapping() {
    let config = AppConfig {
        log_level: 3,
        color: ColorIntent::Always,
        no_log_file: true,
        ..AppConfig::default()
    };

    let logger = config.to_logger_config(false);
    assert_eq!(logger.level, LogLevel::Debug);
    assert!(logger.ansi);
    assert_eq!(logger.log_file, None);
}

#[test]
fn test_endpoints_and_networking() {
    let config = AppConfig {
        curseforge_api_key: Some("secret".to_string()),
        net_timeout: Some(5),
        ..AppConfig::default()
    };

    let endpoints = config.endpoints();
    assert_eq!(endpoints.curseforge, "http://api-pocket.com");
    assert_eq!(endpoints.curseforge_api_key.as_deref(), Some("secret"));
    assert_eq!(config.networking_config().timeout_seconds, Some(5));
}

#[test]
fn test_validate_accepts_existing_workdir() {
    let temp = TempDir::new().unwrap();
    let mut config = AppConfig {
        workdir: Some(temp.path().to_path_buf()),
        ..AppConfig::default()
    };

    config.validate().unwrap();
    assert_eq!(config.workdir(), temp.path());
}

#[test]
fn test_validate_rejects_bad_values() {
    let temp = TempDir::new().unwrap();

    let mut missing = AppConfig {
        workdir: Some(temp.path().join("absent")),
        ..AppConfig::default()
    };
    assert!(matches!(missing.validate(), Err(ConfigError::InvalidWorkDir { .. })));

    let mut noisy = AppConfig {
        workdir: Some(temp.path().to_path_buf()),
        log_level: 9,
        ..AppConfig::default()
    };
    assert!(matches!(noisy.validate(), Err(ConfigError::ValidationFailed { .. })));

    let mut bad_url = AppConfig {
        workdir: Some(temp.path().to_path_buf()),
        modrinth_base_url: "not a url".to_string(),
        ..AppConfig::default()
    };
    assert!(matches!(bad_url.validate(), Err(ConfigError::ValidationFailed { .. })));
}
