//! Inline date picker - date widgets for wiki-link dates
//!
//! This crate finds date tokens such as `[[2024-01-15]]` in the visible part
//! of a Markdown document, describes a date-picker widget for each, and turns
//! a picked date back into a single range replacement in the document.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod date;
pub mod decoration;
pub mod host;
pub mod model;
pub mod plugin;
pub mod syntax;
pub mod tracing;
pub mod view;

// Re-export commonly used types
pub use config::{PickerSettings, SettingsStore};
pub use date::{recognize, DateFormat};
pub use decoration::{DateWidget, DecorationSet};
pub use plugin::DatePickerViewPlugin;
pub use view::{MarkdownView, ViewUpdate};
