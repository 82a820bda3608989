use scan_filter::config::{ConfigError, ToolConfig, default_config, load_config, load_config_from_path};
use std::fs;

use tempfile::tempdir;

#[test]
fn test_default_config_has_batch() {
    let config = default_config();
    assert_eq!(config.profile_name, "base");
    assert_eq!(config.scanner.batch, Some(10));
    assert_eq!(config.scanner.cache_blocks, None);
}

#[test]
fn test_load_config_from_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
profile_name = "reporting"

[scanner]
batch = 100
caching = 500
cache_blocks = false
columns = ["first:line", "second"]
"#,
    )
    .expect("failed to write config");

    let config = load_config(Some(&path)).expect("config should load");
    assert_eq!(config.profile_name, "reporting");
    assert_eq!(config.scanner.batch, Some(100));
    assert_eq!(config.scanner.caching, Some(500));
    assert_eq!(config.scanner.cache_blocks, Some(false));
    assert_eq!(config.scanner.columns, vec!["first:line", "second"]);
    assert_eq!(config.scanner.max_versions, None);
}

#[test]
fn test_empty_config_file_equals_default() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").expect("failed to write config");

    assert_eq!(load_config_from_path(&path).unwrap(), ToolConfig::default());
}

#[test]
fn test_malformed_config_reports_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[scanner\nbatch = ").expect("failed to write config");

    let error = load_config_from_path(&path).expect_err("should fail to parse");
    assert!(matches!(error, ConfigError::Parse { .. }));
    assert!(error.to_string().contains("broken.toml"));
}

#[test]
fn test_missing_config_is_read_error() {
    let dir = tempdir().expect("temp dir");
    let error = load_config_from_path(&dir.path().join("nope.toml")).expect_err("missing file");
    assert!(matches!(error, ConfigError::Read { .. }));
}
