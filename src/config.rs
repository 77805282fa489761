//! Application settings
//!
//! Settings are loaded once at startup into a [`SettingsStore`] and change
//! only through [`SettingsStore::update_settings`]. Code that needs them is
//! handed a reference at call time.

use crate::error::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Model used when the settings do not name one
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat-completions endpoint used when the settings do not name one
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Settings of the AI assistant collaborator
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssistantSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl std::fmt::Debug for AssistantSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl AssistantSettings {
    /// The API key, if one is set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key().is_some()
    }
}

/// Persisted application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub assistant: AssistantSettings,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Owner of the loaded settings
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: Settings,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Settings::load(path) {
            Ok(settings) => {
                info!("loaded settings from {}", path.display());
                Self::new(settings)
            }
            Err(e) => {
                warn!("using default settings ({}: {e})", path.display());
                Self::default()
            }
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn assistant(&self) -> &AssistantSettings {
        &self.settings.assistant
    }

    /// Replace the assistant settings
    pub fn update_settings(&mut self, assistant: AssistantSettings) -> &Settings {
        self.settings.assistant = assistant;
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings = Settings::from_json(r#"{"assistant": {"apiKey": "sk-test"}}"#)
            .expect("valid settings");
        assert_eq!(settings.assistant.api_key(), Some("sk-test"));
        assert_eq!(settings.assistant.model, DEFAULT_MODEL);

        let empty = Settings::from_json("{}").expect("valid settings");
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(crate::Error::Json(_))
        ));
    }

    #[test]
    fn test_blank_key_is_no_credential() {
        let settings = AssistantSettings {
            api_key: Some("   ".to_string()),
            ..AssistantSettings::default()
        };
        assert!(!settings.has_credential());
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = AssistantSettings {
            api_key: Some("sk-secret".to_string()),
            ..AssistantSettings::default()
        };
        assert!(!format!("{settings:?}").contains("sk-secret"));
    }

    #[test]
    fn test_update_settings() {
        let mut store = SettingsStore::default();
        assert!(!store.assistant().has_credential());

        store.update_settings(AssistantSettings {
            api_key: Some("sk-new".to_string()),
            model: "local".to_string(),
            ..AssistantSettings::default()
        });
        assert_eq!(store.assistant().api_key(), Some("sk-new"));
        assert_eq!(store.settings().assistant.model, "local");
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("openwriter-settings-{}.json", std::process::id()));
        let settings = Settings {
            assistant: AssistantSettings {
                api_key: Some("sk-file".to_string()),
                ..AssistantSettings::default()
            },
        };
        settings.save(&path).expect("writable temp dir");
        let store = SettingsStore::load_or_default(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(store.settings(), &settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let store = SettingsStore::load_or_default("/nonexistent/openwriter/settings.json");
        assert_eq!(store.settings(), &Settings::default());
    }
}
