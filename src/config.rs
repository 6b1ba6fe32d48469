//! Picker settings and their persistence
//!
//! Stores `{ "dateFormat": "YYYY-MM-DD" }` in
//! `~/.config/inline-date-picker/data.json`. The live value is held by a
//! [`SettingsStore`] that is passed by reference to whatever needs it and
//! notifies subscribers when the format changes.

use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::date::{DateFormat, DEFAULT_DATE_FORMAT};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No config directory available")]
    NoConfigDir,

    #[error("Failed to access settings at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted plugin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerSettings {
    /// Moment-style format of dates in the document (e.g. "YYYY-MM-DD")
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}

impl PickerSettings {
    /// Load settings from the config dir, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::settings_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from `path`; missing or unreadable files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the config dir
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = crate::config_paths::settings_file().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to `path`, creating its parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_err)?;

        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// The effective format; an empty setting falls back to the default
    pub fn date_format(&self) -> DateFormat {
        if self.date_format.trim().is_empty() {
            DateFormat::parse(DEFAULT_DATE_FORMAT)
        } else {
            DateFormat::parse(&self.date_format)
        }
    }
}

/// Sent to subscribers after the settings changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsChanged {
    pub revision: u64,
}

/// Live settings plus change notification
#[derive(Debug, Default)]
pub struct SettingsStore {
    settings: PickerSettings,
    revision: u64,
    subscribers: Vec<Sender<SettingsChanged>>,
}

impl SettingsStore {
    pub fn new(settings: PickerSettings) -> Self {
        Self {
            settings,
            revision: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn settings(&self) -> &PickerSettings {
        &self.settings
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The current effective date format
    pub fn date_format(&self) -> DateFormat {
        self.settings.date_format()
    }

    /// Receive a [`SettingsChanged`] after every change from now on
    pub fn subscribe(&mut self) -> Receiver<SettingsChanged> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Replace the date format and notify subscribers. No-op when unchanged.
    pub fn set_date_format(&mut self, format: &str) {
        if self.settings.date_format == format {
            return;
        }
        self.settings.date_format = format.to_string();
        self.revision += 1;

        let event = SettingsChanged {
            revision: self.revision,
        };
        // Dropped receivers belong to disposed views
        self.subscribers.retain(|tx| tx.send(event).is_ok());

        tracing::debug!(
            format = %self.settings.date_format,
            revision = self.revision,
            subscribers = self.subscribers.len(),
            "date format changed"
        );
    }
}
