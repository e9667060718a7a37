//! Application settings persisted alongside ledger data.

use serde::{Deserialize, Serialize};

/// UI theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// UI theme.
    pub theme: Theme,
    /// Whether auto-save is enabled. Read back at startup to rewire the
    /// auto-save scheduler.
    pub auto_save: bool,
    /// Whether user notifications are enabled.
    pub notifications: bool,
    /// Auto-save cadence in milliseconds.
    pub refresh_interval_ms: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            auto_save: true,
            notifications: true,
            refresh_interval_ms: 30_000,
        }
    }
}

impl AppSettings {
    /// Validate settings values.
    pub fn validate(&self) -> Result<(), String> {
        if self.refresh_interval_ms == 0 {
            return Err("refresh_interval_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse settings from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let settings: Self =
            serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Merge a partial update into these settings, field-wise.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(auto_save) = patch.auto_save {
            self.auto_save = auto_save;
        }
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
        if let Some(refresh_interval_ms) = patch.refresh_interval_ms {
            self.refresh_interval_ms = refresh_interval_ms;
        }
    }
}

/// Partial settings update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    /// New theme, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// New auto-save flag, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
    /// New notifications flag, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    /// New auto-save cadence, if changing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_ms: Option<u64>,
}
