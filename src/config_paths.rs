//! Centralized configuration paths for inline-date-picker
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/inline-date-picker/`
//! - Windows: `%APPDATA%\inline-date-picker\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "inline-date-picker";

/// Base name of the rolling log files
pub const LOG_FILE_PREFIX: &str = "inline-date-picker.log";

/// Base config directory for inline-date-picker
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/inline-date-picker`
///   - Else: `~/.config/inline-date-picker`
///
/// Windows:
///   - `%APPDATA%\inline-date-picker`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/inline-date-picker/data.json`
pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("data.json"))
}

/// `~/.config/inline-date-picker/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
