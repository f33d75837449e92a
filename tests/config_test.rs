//! Tests for configuration loading.

use std::io::Write;

use strictly_millions::{DEFAULT_MAX_SESSIONS, GameConfig};

#[test]
fn test_defaults_when_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::load_or_default(dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.questions(), "assets/questions.toml");
    assert_eq!(*config.seed(), None);
    assert_eq!(config.server().host(), "127.0.0.1");
    assert_eq!(*config.server().port(), 3000);
    assert_eq!(*config.server().max_sessions(), DEFAULT_MAX_SESSIONS);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
questions = "https://example.com/bank.json"
seed = 99

[server]
port = 8080
max_sessions = 16
"#
    )
    .unwrap();

    let config = GameConfig::from_file(file.path()).unwrap();
    assert_eq!(config.questions(), "https://example.com/bank.json");
    assert_eq!(*config.seed(), Some(99));
    assert_eq!(*config.server().port(), 8080);
    assert_eq!(*config.server().max_sessions(), 16);
    assert_eq!(config.server().host(), "127.0.0.1");
    assert_eq!(config.log_filter(), "info,strictly_millions=debug");
}

#[test]
fn test_invalid_file_reports_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = \"not a number\"").unwrap();
    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_overrides() {
    let config = GameConfig::default()
        .with_questions("bank.json")
        .with_seed(5)
        .with_server(Some("0.0.0.0".to_string()), None);
    assert_eq!(config.questions(), "bank.json");
    assert_eq!(*config.seed(), Some(5));
    assert_eq!(config.server().host(), "0.0.0.0");
    assert_eq!(*config.server().port(), 3000);
}
