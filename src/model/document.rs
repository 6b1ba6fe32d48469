//! Document model - the text buffer, its main selection, and the undo stack

use std::borrow::Cow;
use std::cell::RefCell;
use std::ops::Range;
use std::path::Path;
use std::rc::Rc;

use ropey::Rope;

use crate::syntax::MarkdownTree;

use super::selection::{Position, SelectionRange};
use super::transaction::{ChangeSpec, EditError, Transaction};

/// An applied replacement, kept for undo
#[derive(Debug, Clone)]
pub struct EditOperation {
    /// Byte offset where the replacement starts
    pub position: usize,
    pub deleted_text: String,
    pub inserted_text: String,
    pub selection_before: SelectionRange,
}

/// Document state - the text buffer, its selection and edit history
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Main selection, in byte offsets
    pub selection: SelectionRange,
    /// Undo stack
    pub undo_stack: Vec<EditOperation>,
    /// Document revision counter (incremented on each edit)
    pub revision: u64,
    /// Syntax tree and the revision it was parsed from
    syntax: RefCell<Option<(u64, Rc<MarkdownTree>)>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            selection: SelectionRange::cursor(0),
            undo_stack: Vec::new(),
            revision: 0,
            syntax: RefCell::new(None),
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::with_text(&content))
    }

    /// Length of the buffer in bytes
    pub fn len_bytes(&self) -> usize {
        self.buffer.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len_bytes() == 0
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Text of a byte range, borrowed when the rope chunk allows it.
    /// Returns `None` for ranges that are out of bounds or split a character.
    pub fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>> {
        if range.start > range.end
            || !self.is_char_boundary(range.start)
            || !self.is_char_boundary(range.end)
        {
            return None;
        }
        self.buffer.get_byte_slice(range).map(Cow::from)
    }

    /// Whether `offset` falls on a char boundary inside the buffer
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        if offset > self.buffer.len_bytes() {
            return false;
        }
        let char_idx = self.buffer.byte_to_char(offset);
        self.buffer.char_to_byte(char_idx) == offset
    }

    /// Get the length of a line in chars (excluding newline character)
    pub fn line_length(&self, line_idx: usize) -> usize {
        if line_idx < self.buffer.len_lines() {
            let line = self.buffer.line(line_idx);
            line.len_chars().saturating_sub(
                if line.len_chars() > 0 && line.chars().last() == Some('\n') {
                    1
                } else {
                    0
                },
            )
        } else {
            0
        }
    }

    /// Convert a (line, column) position to a byte offset, clamping to the line
    pub fn position_to_offset(&self, pos: Position) -> usize {
        if pos.line >= self.buffer.len_lines() {
            return self.buffer.len_bytes();
        }
        let line_start = self.buffer.line_to_char(pos.line);
        let char_idx = line_start + pos.column.min(self.line_length(pos.line));
        self.buffer.char_to_byte(char_idx)
    }

    /// Convert a byte offset to a (line, column) position
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let clamped = offset.min(self.buffer.len_bytes());
        let char_idx = self.buffer.byte_to_char(clamped);
        let line = self.buffer.char_to_line(char_idx);
        let line_start = self.buffer.line_to_char(line);
        Position::new(line, char_idx - line_start)
    }

    /// Markdown syntax tree of the current revision, parsed on first use
    pub fn syntax_tree(&self) -> Rc<MarkdownTree> {
        if let Some((revision, tree)) = self.syntax.borrow().as_ref() {
            if *revision == self.revision {
                return Rc::clone(tree);
            }
        }

        let tree = Rc::new(MarkdownTree::parse(&self.buffer.to_string()));
        tracing::trace!(
            revision = self.revision,
            nodes = tree.len(),
            "parsed markdown syntax tree"
        );
        *self.syntax.borrow_mut() = Some((self.revision, Rc::clone(&tree)));
        tree
    }

    /// Build a transaction against the current state without applying it
    pub fn update(&self, changes: ChangeSpec, selection: Option<SelectionRange>) -> Transaction {
        Transaction::new(changes, selection)
    }

    /// Apply a transaction as one undoable edit
    pub fn dispatch(&mut self, tx: Transaction) -> Result<(), EditError> {
        let ChangeSpec { from, to, insert } = tx.changes;
        let len = self.buffer.len_bytes();

        if from > to {
            return Err(EditError::Reversed { from, to });
        }
        if to > len {
            return Err(EditError::OutOfBounds { from, to, len });
        }
        for offset in [from, to] {
            if !self.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary { offset });
            }
        }

        let new_len = len - (to - from) + insert.len();
        if let Some(sel) = tx.selection {
            let offset = sel.anchor.max(sel.head);
            if offset > new_len {
                return Err(EditError::SelectionOutOfBounds {
                    offset,
                    len: new_len,
                });
            }
        }

        let selection_before = self.selection;
        let deleted_text = self.buffer.byte_slice(from..to).to_string();
        let start_char = self.buffer.byte_to_char(from);
        let end_char = self.buffer.byte_to_char(to);
        self.buffer.remove(start_char..end_char);
        self.buffer.insert(start_char, &insert);

        self.selection = tx
            .selection
            .unwrap_or_else(|| selection_before.map_through(from, to, insert.len()));

        tracing::trace!(
            from,
            to,
            inserted = insert.len(),
            revision = self.revision + 1,
            "applied transaction"
        );

        self.push_edit(EditOperation {
            position: from,
            deleted_text,
            inserted_text: insert,
            selection_before,
        });
        Ok(())
    }

    /// Push an edit operation onto the undo stack
    fn push_edit(&mut self, op: EditOperation) {
        self.undo_stack.push(op);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Revert the most recent edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.undo_stack.pop() else {
            return false;
        };
        let start_char = self.buffer.byte_to_char(op.position);
        let end_char = self
            .buffer
            .byte_to_char(op.position + op.inserted_text.len());
        self.buffer.remove(start_char..end_char);
        self.buffer.insert(start_char, &op.deleted_text);
        self.selection = op.selection_before;
        self.revision = self.revision.wrapping_add(1);
        true
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.buffer.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_by_bytes() {
        let doc = Document::with_text("a [[2024-01-15]] b");
        assert_eq!(doc.slice(4..14).as_deref(), Some("2024-01-15"));
        assert_eq!(doc.slice(4..99), None);
    }

    #[test]
    fn test_slice_rejects_split_char() {
        let doc = Document::with_text("é");
        assert_eq!(doc.slice(0..1), None);
        assert_eq!(doc.slice(0..2).as_deref(), Some("é"));
    }

    #[test]
    fn test_position_offset_round_trip_multibyte() {
        let doc = Document::with_text("héllo\nwörld");
        let pos = Position::new(1, 2);
        let offset = doc.position_to_offset(pos);
        assert_eq!(offset, 7 + 3); // "héllo\n" is 7 bytes, "wö" is 3 bytes
        assert_eq!(doc.offset_to_position(offset), pos);
    }

    #[test]
    fn test_position_to_offset_clamps_column() {
        let doc = Document::with_text("ab\ncd");
        assert_eq!(doc.position_to_offset(Position::new(0, 10)), 2);
        assert_eq!(doc.position_to_offset(Position::new(9, 0)), 5);
    }

    #[test]
    fn test_dispatch_replaces_range_and_maps_selection() {
        let mut doc = Document::with_text("hello world");
        doc.selection = SelectionRange::cursor(11);
        let tx = doc.update(ChangeSpec::new(0, 5, "goodbye"), None);
        doc.dispatch(tx).unwrap();
        assert_eq!(doc.to_string(), "goodbye world");
        assert_eq!(doc.selection, SelectionRange::cursor(13));
        assert_eq!(doc.revision, 1);
    }

    #[test]
    fn test_dispatch_explicit_selection() {
        let mut doc = Document::with_text("abc");
        let tx = doc.update(ChangeSpec::insert(3, "def"), Some(SelectionRange::cursor(6)));
        doc.dispatch(tx).unwrap();
        assert_eq!(doc.selection, SelectionRange::cursor(6));
    }

    #[test]
    fn test_dispatch_rejects_bad_ranges() {
        let mut doc = Document::with_text("é!");
        assert_eq!(
            doc.dispatch(Transaction::new(ChangeSpec::new(2, 1, ""), None)),
            Err(EditError::Reversed { from: 2, to: 1 })
        );
        assert_eq!(
            doc.dispatch(Transaction::new(ChangeSpec::new(0, 9, ""), None)),
            Err(EditError::OutOfBounds {
                from: 0,
                to: 9,
                len: 3
            })
        );
        assert_eq!(
            doc.dispatch(Transaction::new(ChangeSpec::new(1, 2, ""), None)),
            Err(EditError::NotCharBoundary { offset: 1 })
        );
        assert_eq!(doc.revision, 0);
        assert_eq!(doc.to_string(), "é!");
    }

    #[test]
    fn test_syntax_tree_follows_edits() {
        let mut doc = Document::with_text("[[a]]");
        let first = doc.syntax_tree();
        assert!(Rc::ptr_eq(&first, &doc.syntax_tree()));

        doc.dispatch(Transaction::new(ChangeSpec::insert(0, "`"), None))
            .unwrap();
        let after_edit = doc.syntax_tree();
        assert!(!Rc::ptr_eq(&first, &after_edit));
        assert_eq!(first.len(), 3);
        assert_eq!(after_edit.len(), 3);

        doc.dispatch(Transaction::new(ChangeSpec::insert(6, "`"), None))
            .unwrap();
        assert!(doc.syntax_tree().is_empty());

        assert!(doc.undo());
        assert_eq!(doc.syntax_tree().len(), 3);
    }

    #[test]
    fn test_undo_restores_text_and_selection() {
        let mut doc = Document::with_text("[[2024-01-15]]");
        doc.selection = SelectionRange::cursor(5);
        let tx = doc.update(
            ChangeSpec::new(0, 14, "[[2025-03-01]]"),
            Some(SelectionRange::cursor(14)),
        );
        doc.dispatch(tx).unwrap();
        assert_eq!(doc.to_string(), "[[2025-03-01]]");

        assert!(doc.undo());
        assert_eq!(doc.to_string(), "[[2024-01-15]]");
        assert_eq!(doc.selection, SelectionRange::cursor(5));
        assert!(!doc.undo());
    }
}
