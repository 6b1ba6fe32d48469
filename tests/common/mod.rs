//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::ops::Range;

use chrono::NaiveDate;
use inline_date_picker::config::{PickerSettings, SettingsStore};
use inline_date_picker::host::EditorView;
use inline_date_picker::model::{Document, EditError, Transaction};
use inline_date_picker::view::MarkdownView;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A settings store holding `format`
pub fn settings_with(format: &str) -> SettingsStore {
    SettingsStore::new(PickerSettings {
        date_format: format.to_string(),
    })
}

/// A view over `text` with the whole document visible and the cursor at `cursor`
pub fn view_with_cursor(text: &str, cursor: usize) -> MarkdownView {
    let mut view = MarkdownView::with_text(text);
    view.set_cursor_offset(cursor);
    view.take_update();
    view
}

/// Editor view that counts what the core asks of it
pub struct RecordingView {
    pub inner: MarkdownView,
    pub dispatched: Vec<Transaction>,
    pub focus_calls: usize,
    /// When set, overrides the visible ranges reported to the builder
    pub ranges_override: Option<Vec<Range<usize>>>,
}

impl RecordingView {
    pub fn new(text: &str, cursor: usize) -> Self {
        Self {
            inner: view_with_cursor(text, cursor),
            dispatched: Vec::new(),
            focus_calls: 0,
            ranges_override: None,
        }
    }

    pub fn text(&self) -> String {
        self.inner.document.to_string()
    }

    pub fn cursor(&self) -> usize {
        self.inner.cursor_offset()
    }
}

impl EditorView for RecordingView {
    type State = Document;

    fn state(&self) -> &Document {
        self.inner.state()
    }

    fn visible_ranges(&self) -> Vec<Range<usize>> {
        self.ranges_override
            .clone()
            .unwrap_or_else(|| self.inner.visible_ranges())
    }

    fn dispatch(&mut self, tx: Transaction) -> Result<(), EditError> {
        self.dispatched.push(tx.clone());
        self.inner.dispatch(tx)
    }

    fn focus(&mut self) {
        self.focus_calls += 1;
        self.inner.focus();
    }

    fn has_focus(&self) -> bool {
        self.inner.has_focus()
    }
}
