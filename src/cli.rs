//! Command-line argument parsing
//!
//! Supports:
//! - Listing date widgets in the visible part of a file
//! - Picking a new date for the widget at an offset
//! - Inserting today's date (optionally as a link)
//! - Opening the picker at the cursor
//! - Showing and changing the date format setting

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inline date pickers for wiki-link dates in Markdown files
#[derive(Parser, Debug)]
#[command(name = "inline-date-picker", version, about)]
pub struct CliArgs {
    /// Override the configured date format for this run
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// List the date widgets in the visible lines of a file
    Scan {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Pick a new date for the widget containing an offset
    Pick {
        #[command(flatten)]
        view: ViewArgs,
        /// Byte offset inside the widget
        #[arg(long)]
        at: usize,
        /// New date, ISO `YYYY-MM-DD`
        #[arg(long)]
        date: String,
        /// Byte offset of the text cursor before the edit
        #[arg(long)]
        cursor: Option<usize>,
        /// Write the result back to the file instead of printing it
        #[arg(short, long)]
        write: bool,
    },
    /// Insert today's date at a line/column
    Today {
        #[command(flatten)]
        view: ViewArgs,
        /// Insert as a `[[...]]` link
        #[arg(long)]
        link: bool,
        /// Line to insert at (1-indexed)
        #[arg(long, default_value_t = 1)]
        line: usize,
        /// Column to insert at (1-indexed)
        #[arg(long, default_value_t = 1)]
        column: usize,
        /// Write the result back to the file instead of printing it
        #[arg(short, long)]
        write: bool,
    },
    /// Open the date picker at a cursor offset
    Open {
        #[command(flatten)]
        view: ViewArgs,
        /// Byte offset of the text cursor
        #[arg(long)]
        cursor: usize,
    },
    /// Show or change the persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the settings file path and contents
    Show,
    /// Set and save the date format
    SetFormat {
        /// Moment-style format, e.g. `YYYY-MM-DD` or `MMMM Do, YYYY`
        format: String,
    },
}

/// Which file and which part of it is "on screen"
#[derive(Args, Debug, Clone)]
pub struct ViewArgs {
    /// Markdown file to operate on
    pub file: PathBuf,
    /// First visible line (1-indexed)
    #[arg(long, default_value_t = 1)]
    pub top_line: usize,
    /// Number of visible lines (defaults to the whole file)
    #[arg(long)]
    pub lines: Option<usize>,
}
