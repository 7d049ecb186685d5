use super::*;

fn assert_primary_names_parse<T>()
where
    T: ValueEnum + FromStr + PartialEq + std::fmt::Debug,
    T::Err: std::fmt::Debug,
{
    for variant in T::value_variants() {
        let name = variant
            .to_possible_value()
            .map(|value| value.get_name().to_string())
            .unwrap_or_default();
        assert_eq!(name.parse::<T>().unwrap(), *variant, "primary name '{}'", name);
    }
}

#[test]
fn test_every_variant_parses_from_its_cli_name() {
    assert_primary_names_parse::<LogLevel>();
    assert_primary_names_parse::<LogFormat>();
    assert_primary_names_parse::<LogOutput>();
    assert_primary_names_parse::<ColorIntent>();
}

#[test]
fn test_aliases_parse() {
    assert_eq!("fatal".parse::<LogLevel>().unwrap(), LogLevel::Error);
    assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
    assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
    assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Trace);
    assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("PRETTY".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    assert_eq!("force".parse::<ColorIntent>().unwrap(), ColorIntent::Always);
    assert_eq!("none".parse::<ColorIntent>().unwrap(), ColorIntent::Never);
    assert_eq!("stdout".parse::<LogOutput>().unwrap(), LogOutput::Stdout);
}

#[test]
fn test_invalid_value_reports_parse_error() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    match err {
        ConfigError::ParseError { value, reason } => {
            assert_eq!(value, "loud");
            assert!(reason.contains("log level"));
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_verbosity_mapping() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(200), LogLevel::Trace);
    assert_eq!(LogLevel::from_verbosity(1).as_filter(), "warn");
}

#[test]
fn test_color_intent_resolution() {
    assert!(ColorIntent::Auto.use_ansi(true));
    assert!(!ColorIntent::Auto.use_ansi(false));
    assert!(ColorIntent::Always.use_ansi(false));
    assert!(!ColorIntent::Never.use_ansi(true));
}
