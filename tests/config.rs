//! Configuration tests
//!
//! Tests for config paths and settings persistence.

use inline_date_picker::config::{PickerSettings, SettingsStore};
use inline_date_picker::config_paths;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("inline-date-picker"));
}

#[test]
fn test_settings_file_ends_with_json() {
    let path = config_paths::settings_file().unwrap();
    assert!(path.to_string_lossy().ends_with("data.json"));
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    let config = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&config));
}

// ========================================================================
// Settings Persistence Tests
// ========================================================================

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data.json");

    let settings = PickerSettings {
        date_format: "DD.MM.YYYY".to_string(),
    };
    settings.save_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"dateFormat\""));
    assert_eq!(PickerSettings::load_from(&path), settings);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = PickerSettings::load_from(&dir.path().join("data.json"));
    assert_eq!(settings, PickerSettings::default());
}

#[test]
fn test_invalid_json_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert_eq!(PickerSettings::load_from(&path), PickerSettings::default());
}

#[test]
fn test_missing_key_uses_default_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{}").unwrap();
    assert_eq!(PickerSettings::load_from(&path).date_format, "YYYY-MM-DD");
}

#[test]
fn test_unknown_keys_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"dateFormat":"YYYY/MM/DD","theme":"dark"}"#).unwrap();
    assert_eq!(PickerSettings::load_from(&path).date_format, "YYYY/MM/DD");
}

#[test]
fn test_empty_format_falls_back_to_default() {
    let settings = PickerSettings {
        date_format: "  ".to_string(),
    };
    assert_eq!(settings.date_format().as_str(), "YYYY-MM-DD");
}

// ========================================================================
// Settings Store Tests
// ========================================================================

#[test]
fn test_store_notifies_subscribers() {
    let mut store = SettingsStore::new(PickerSettings::default());
    let rx = store.subscribe();

    store.set_date_format("DD/MM/YYYY");

    let event = rx.try_recv().unwrap();
    assert_eq!(event.revision, 1);
    assert_eq!(store.date_format().as_str(), "DD/MM/YYYY");
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_store_skips_unchanged_format() {
    let mut store = SettingsStore::new(PickerSettings::default());
    let rx = store.subscribe();
    store.set_date_format("YYYY-MM-DD");
    assert_eq!(store.revision(), 0);
    assert!(rx.try_recv().is_err());
}
