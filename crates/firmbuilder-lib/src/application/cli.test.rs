use super::*;
use crate::primitives::ColorIntent;
use tempfile::TempDir;

fn quiet_env() -> EnvironmentConfig {
    EnvironmentConfig::from_vars(Vec::new()).unwrap()
}

#[test]
fn test_no_subcommand_means_build() {
    let cli = Cli::try_parse_from(["firmbuilder"]).unwrap();
    assert_eq!(cli.command, None);
    assert_eq!(Cli::default().command.unwrap_or_default(), Commands::Build { clean: false });
}

#[test]
fn test_parse_subcommands() {
    let build = Cli::try_parse_from(["firmbuilder", "build", "--clean"]).unwrap();
    assert_eq!(build.command, Some(Commands::Build { clean: true }));

    let clean = Cli::try_parse_from(["firmbuilder", "clean"]).unwrap();
    assert_eq!(clean.command, Some(Commands::Clean));
}

#[test]
fn test_global_flags() {
    let cli = Cli::try_parse_from([
        "firmbuilder",
        "--pack-file",
        "other.json",
        "--log-level",
        "4",
        "--color",
        "never",
        "--net-timeout",
        "15",
        "version",
    ])
    .unwrap();

    assert_eq!(cli.config.pack_file.to_str(), Some("other.json"));
    assert_eq!(cli.config.log_level, 4);
    assert_eq!(cli.config.color, ColorIntent::Never);
    assert_eq!(cli.config.net_timeout, Some(15));
    assert_eq!(cli.command, Some(Commands::Version));
}

#[test]
fn test_from_cli_validates_and_applies_environment() {
    let temp = TempDir::new().unwrap();
    let workdir = temp.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["firmbuilder", "--workdir", workdir]).unwrap();
    let ci = EnvironmentConfig::from_vars(vec![("CI".to_string(), "true".to_string())]).unwrap();

    let config = CliConfig::from_cli(cli, &ci).unwrap();

    assert_eq!(config.app_config.color, ColorIntent::Never);
    assert_eq!(config.app_config.workdir(), temp.path());
    assert_eq!(config.command(), Commands::Build { clean: false });
}

#[test]
fn test_explicit_color_flag_beats_environment() {
    let temp = TempDir::new().unwrap();
    let workdir = temp.path().to_str().unwrap();
    let cli = Cli::try_parse_from(["firmbuilder", "-w", workdir, "--color", "always"]).unwrap();
    let no_color =
        EnvironmentConfig::from_vars(vec![("NO_COLOR".to_string(), "1".to_string())]).unwrap();

    let config = CliConfig::from_cli(cli, &no_color).unwrap();
    assert_eq!(config.app_config.color, ColorIntent::Always);

    let plain = Cli::try_parse_from(["firmbuilder", "-w", workdir]).unwrap();
    assert_eq!(
        CliConfig::from_cli(plain, &quiet_env()).unwrap().app_config.color,
        ColorIntent::Auto
    );
}

#[test]
fn test_from_cli_rejects_missing_workdir() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent");
    let cli =
        Cli::try_parse_from(["firmbuilder", "-w", missing.to_str().unwrap()]).unwrap();

    assert!(CliConfig::from_cli(cli, &quiet_env()).is_err());
}
