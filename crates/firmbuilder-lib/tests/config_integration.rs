use clap::Parser;
use firmbuilder_lib::application::{AppConfig, Cli, CliConfig, Commands, EnvironmentConfig};
use firmbuilder_lib::primitives::{ColorIntent, ConfigError};

#[test]
fn test_config_default_creation() {
    let config = AppConfig::default();

    assert!(config.log_level <= 4);
    assert_eq!(config.net_timeout, None);
    assert_eq!(config.color, ColorIntent::Auto);
    assert!(!config.no_log_file);
}

#[test]
fn test_cli_arguments_reach_app_config() {
    let workdir = tempfile::tempdir().unwrap();
    let cli = Cli::try_parse_from([
        "firmbuilder",
        "--workdir",
        workdir.path().to_str().unwrap(),
        "--pack-file",
        "other.json",
        "--net-timeout",
        "5",
        "build",
        "--clean",
    ])
    .unwrap();

    let config = CliConfig::from_cli(cli, &EnvironmentConfig::default()).unwrap();

    assert_eq!(config.command(), Commands::Build { clean: true });
    assert_eq!(config.app_config.pack_path(), workdir.path().join("other.json"));
    assert_eq!(config.app_config.net_timeout, Some(5));
}

#[test]
fn test_ci_environment_disables_color() {
    let workdir = tempfile::tempdir().unwrap();
    let cli = Cli::try_parse_from(["firmbuilder", "-w", workdir.path().to_str().unwrap()]).unwrap();
    let environment =
        EnvironmentConfig::from_vars(vec![("CI".to_string(), "true".to_string())]).unwrap();

    let config = CliConfig::from_cli(cli, &environment).unwrap();

    assert_eq!(config.app_config.color, ColorIntent::Never);
    assert_eq!(config.command(), Commands::default());
}

#[test]
fn test_missing_workdir_is_rejected() {
    let workdir = tempfile::tempdir().unwrap();
    let missing = workdir.path().join("nope");
    let cli = Cli::try_parse_from(["firmbuilder", "-w", missing.to_str().unwrap()]).unwrap();

    let result = CliConfig::from_cli(cli, &EnvironmentConfig::default());

    assert!(matches!(result, Err(ConfigError::InvalidWorkDir { .. })));
}
