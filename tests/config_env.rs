//! Configuration Tests
//!
//! Dotenv loading and environment validation, using variable lookups backed
//! by parsed files rather than the process environment.

use std::collections::HashMap;
use std::fs;

use tempfile::TempDir;

use banco_tierras::config::{load_env_file, ConfigError, DatabaseConfig};

fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".env");
    fs::write(&path, contents).unwrap();

    dotenvy::from_path_iter(&path)
        .unwrap()
        .map(|item| item.unwrap())
        .collect()
}

#[test]
fn test_config_from_env_file() {
    let vars = parse_env_file(
        "DB_HOST=db.internal\nDB_PORT=5432\nDB_USER=lector\nDB_NAME=banco\nDB_PASSWORD=s3cret\n",
    );
    let config = DatabaseConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();

    assert_eq!(config.host, "db.internal");
    assert_eq!(config.port, 5432);
    assert_eq!(config.database, "banco");
    assert!(!config.resolve_host);
    assert!(!format!("{:?}", config).contains("s3cret"));
}

#[test]
fn test_first_missing_variable_is_reported() {
    let vars = parse_env_file("DB_HOST=db.internal\nDB_PORT=5432\n");
    let err = DatabaseConfig::from_lookup(|name| vars.get(name).cloned()).unwrap_err();

    assert_eq!(err, ConfigError::MissingVar("DB_USER"));
}

#[test]
fn test_explicit_env_file_must_exist() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("absent.env");

    let err = load_env_file(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::EnvFile { .. }));
}

#[test]
fn test_env_file_does_not_override_existing_variables() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("override.env");
    fs::write(
        &path,
        "BT_TEST_PRESET_VAR=from_file\nBT_TEST_FRESH_VAR=from_file\n",
    )
    .unwrap();

    std::env::set_var("BT_TEST_PRESET_VAR", "from_process");
    load_env_file(Some(&path)).unwrap();

    assert_eq!(std::env::var("BT_TEST_PRESET_VAR").unwrap(), "from_process");
    assert_eq!(std::env::var("BT_TEST_FRESH_VAR").unwrap(), "from_file");
}
