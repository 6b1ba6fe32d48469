//! The date widget value
//!
//! A [`DateWidget`] describes what to render: its bound document range, the
//! parsed date, and the format and delimiters it must write back. It never
//! changes after construction; the rendered control lives in
//! [`super::render::RenderedPicker`].

use std::ops::Range;

use chrono::NaiveDate;

use crate::date::{self, DateFormat};
use crate::host::{EditorState, SyntaxSource};
use crate::model::{ChangeSpec, SelectionRange, Transaction};

pub const LINK_OPEN: &str = "[[";
pub const LINK_CLOSE: &str = "]]";

/// Byte width of the link delimiter swallowed on each side of a link target
pub const DELIMITER_WIDTH: usize = 2;

/// How the matched date was delimited in the document.
///
/// Commits write back the same delimiters the widget was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapping {
    /// `[[date]]`: the bound range includes both delimiters
    Link,
    /// The bound range is just the date text (e.g. the target of `[[date|alias]]`)
    Bare,
}

impl Wrapping {
    pub fn wrap(self, text: &str) -> String {
        match self {
            Wrapping::Link => format!("{LINK_OPEN}{text}{LINK_CLOSE}"),
            Wrapping::Bare => text.to_string(),
        }
    }

    /// Strip the delimiters this wrapping expects, if present
    pub fn unwrap(self, text: &str) -> Option<&str> {
        match self {
            Wrapping::Link => text.strip_prefix(LINK_OPEN)?.strip_suffix(LINK_CLOSE),
            Wrapping::Bare => Some(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWidget {
    from: usize,
    to: usize,
    date: NaiveDate,
    format: DateFormat,
    wrapping: Wrapping,
}

impl DateWidget {
    pub fn new(
        from: usize,
        to: usize,
        date: NaiveDate,
        format: DateFormat,
        wrapping: Wrapping,
    ) -> Self {
        Self {
            from,
            to,
            date,
            format,
            wrapping,
        }
    }

    /// Start of the bound range (inclusive)
    pub fn from(&self) -> usize {
        self.from
    }

    /// End of the bound range (exclusive)
    pub fn to(&self) -> usize {
        self.to
    }

    pub fn range(&self) -> Range<usize> {
        self.from..self.to
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn format(&self) -> &DateFormat {
        &self.format
    }

    pub fn wrapping(&self) -> Wrapping {
        self.wrapping
    }

    /// Whether `offset` is inside the bound range, both ends inclusive
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.from && offset <= self.to
    }

    /// Value for the native control, always ISO regardless of the display format
    pub fn calendar_value(&self) -> String {
        date::calendar_value(self.date)
    }

    /// Document text that represents `date` for this widget
    pub fn replacement(&self, date: NaiveDate) -> String {
        self.wrapping.wrap(&self.format.format(date))
    }

    /// Whether the bound range still holds a token this widget could have been built from
    pub fn matches<S: SyntaxSource + ?Sized>(&self, source: &S) -> bool {
        let Some(text) = source.slice(self.range()) else {
            return false;
        };
        self.wrapping
            .unwrap(&text)
            .and_then(|inner| date::recognize(inner, &self.format))
            .is_some()
    }

    /// The single edit that writes `date` over the bound range.
    ///
    /// When the main cursor sits in the bound range it moves to the end of
    /// the replacement; otherwise the selection is left to the document.
    pub fn commit<S: EditorState + ?Sized>(&self, state: &S, date: NaiveDate) -> Transaction {
        let insert = self.replacement(date);
        let anchor = state.main_selection().anchor;
        let selection = self
            .contains(anchor)
            .then(|| SelectionRange::cursor(self.from + insert.len()));
        Transaction::new(ChangeSpec::new(self.from, self.to, insert), selection)
    }
}
