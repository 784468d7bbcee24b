//! Configuration file loading tests
//!
//! - Missing TOML file falls back to defaults
//! - Present file is parsed and merged with defaults
//! - Malformed file is a configuration error

use arman_common::config::{Config, ConfigOverrides, TomlConfig};
use arman_common::Error;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = TomlConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arman.toml");
    std::fs::write(
        &path,
        r#"
        host = "0.0.0.0"
        database_path = "/var/lib/arman/arman.db"

        [database]
        max_connections = 4
        "#,
    )
    .unwrap();

    let config = TomlConfig::load(&path).unwrap();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 5780);
    assert_eq!(config.database_path, PathBuf::from("/var/lib/arman/arman.db"));
    assert_eq!(config.database.max_connections, 4);
    assert_eq!(config.database.busy_timeout_ms, 5000);

    let resolved = Config::resolve(config, ConfigOverrides::default());
    assert_eq!(resolved.bind_address(), "0.0.0.0:5780");
}

#[test]
fn test_malformed_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("arman.toml");
    std::fs::write(&path, "[database\nmax_connections = ").unwrap();

    assert!(matches!(TomlConfig::load(&path), Err(Error::Config(_))));
}
