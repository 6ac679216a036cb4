//! Load config files the way the binary does.

use std::path::PathBuf;
use uniassist_config::{AppConfig, ConfigError, DEFAULT_PORTAL_URL};

#[test]
fn onboard_output_loads_back_as_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, AppConfig::default_toml()).unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.default_provider, "groq");
    assert_eq!(config.job_search.portal_url, DEFAULT_PORTAL_URL);
    assert_eq!(config.job_search.fetch_timeout_secs, 30);
    assert_eq!(config.paths.document, PathBuf::from("DIU.pdf"));
    assert!(config.api_key.is_none());
}

#[test]
fn full_file_with_provider_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
default_provider = "local"
default_temperature = 0.2

[assistant]
history_turns = 0
show_tool_calls = false

[job_search]
portal_url = "https://jobs.example.edu/search?q=cse"

[providers.local]
api_url = "http://127.0.0.1:8000/v1"
default_model = "qwen2.5-7b"
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.default_provider, "local");
    assert_eq!(config.assistant.history_turns, 0);
    assert!(!config.assistant.show_tool_calls);
    assert_eq!(config.assistant.max_tool_iterations, 10);

    let local = &config.providers["local"];
    assert_eq!(local.api_url.as_deref(), Some("http://127.0.0.1:8000/v1"));
    assert_eq!(local.default_model.as_deref(), Some("qwen2.5-7b"));
}

#[test]
fn zero_tool_iterations_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[assistant]\nmax_tool_iterations = 0\n").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(ref m) if m.contains("max_tool_iterations")));
}

#[test]
fn directory_in_place_of_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AppConfig::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError { .. }));
}
