//! Document change requests
//!
//! A [`Transaction`] is a single range replacement plus an optional new
//! selection. The document is the arbiter of whether it applies.

use thiserror::Error;

use super::selection::SelectionRange;

/// Replace `from..to` (byte offsets) with `insert`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSpec {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl ChangeSpec {
    pub fn new(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }

    /// Pure insertion at `at`
    pub fn insert(at: usize, insert: impl Into<String>) -> Self {
        Self::new(at, at, insert)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub changes: ChangeSpec,
    /// Explicit selection after the change; `None` maps the current one
    pub selection: Option<SelectionRange>,
}

impl Transaction {
    pub fn new(changes: ChangeSpec, selection: Option<SelectionRange>) -> Self {
        Self { changes, selection }
    }
}

/// Why the document refused a transaction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("change range {from}..{to} is reversed")]
    Reversed { from: usize, to: usize },

    #[error("change range {from}..{to} exceeds document length {len}")]
    OutOfBounds { from: usize, to: usize, len: usize },

    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },

    #[error("selection offset {offset} exceeds document length {len}")]
    SelectionOutOfBounds { offset: usize, len: usize },
}
