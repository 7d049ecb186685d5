use super::*;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_filter_directive_scopes_crates() {
    let directive = filter_directive(LogLevel::Debug);
    assert!(directive.starts_with("firmbuilder_lib=debug,firmbuilder=debug"));
    assert!(directive.contains("reqwest=warn"));
    assert!(directive.ends_with(",debug"));

    // Must be accepted by the subscriber's parser
    assert!(EnvFilter::try_new(&directive).is_ok());
}

#[test]
fn test_open_log_file_appends() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("builder.log");

    {
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "first").unwrap();
    }
    {
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "second").unwrap();
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "first\nsecond\n");
}

#[test]
fn test_open_log_file_missing_parent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("no-such-dir").join("builder.log");

    let err = open_log_file(&path).unwrap_err();
    assert!(matches!(err, LoggerError::LogFileError { .. }));
    assert!(err.to_string().contains("builder.log"));
}

#[test]
fn test_logger_global_consistent() {
    assert_eq!(Logger::is_initialized(), Logger::global().is_some());
}
