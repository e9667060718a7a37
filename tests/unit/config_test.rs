//! Tests for settings validation and parsing

use resource_ledger::config::{AppSettings, SettingsPatch, Theme};

#[test]
fn test_default_settings() {
    let settings = AppSettings::default();
    assert_eq!(settings.theme, Theme::Light);
    assert!(settings.auto_save);
    assert!(settings.notifications);
    assert_eq!(settings.refresh_interval_ms, 30_000);
}

#[test]
fn test_settings_validation() {
    let valid = AppSettings::default();
    assert!(valid.validate().is_ok());

    let invalid = AppSettings {
        refresh_interval_ms: 0,
        ..AppSettings::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_settings_from_json() {
    let json = r#"{
        "theme": "dark",
        "autoSave": false,
        "notifications": true,
        "refreshIntervalMs": 10000
    }"#;
    let settings = AppSettings::from_json_str(json).unwrap();
    assert_eq!(settings.theme, Theme::Dark);
    assert!(!settings.auto_save);
    assert_eq!(settings.refresh_interval_ms, 10_000);
}

#[test]
fn test_settings_from_json_rejects_zero_interval() {
    let json = r#"{
        "theme": "light",
        "autoSave": true,
        "notifications": true,
        "refreshIntervalMs": 0
    }"#;
    assert!(AppSettings::from_json_str(json).is_err());
}

#[test]
fn test_settings_patch_merge() {
    let mut settings = AppSettings::default();
    settings.apply(SettingsPatch {
        theme: Some(Theme::Dark),
        auto_save: Some(false),
        ..SettingsPatch::default()
    });
    assert_eq!(settings.theme, Theme::Dark);
    assert!(!settings.auto_save);
    // Untouched fields keep their values.
    assert!(settings.notifications);
    assert_eq!(settings.refresh_interval_ms, 30_000);
}
