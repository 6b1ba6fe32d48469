//! Markdown editor view
//!
//! Binds a [`Document`] to a [`Viewport`] and a focus flag, and records what
//! changed since the last update so the decoration plugin knows when to
//! rebuild.

use std::borrow::Cow;
use std::ops::Range;

use crate::host::{Editor, EditorState, EditorView, SyntaxSource};
use crate::model::{
    ChangeSpec, Document, EditError, Position, SelectionRange, Transaction, Viewport,
};
use crate::syntax::SyntaxNode;

/// What changed since the previous update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
    pub focus_changed: bool,
}

impl ViewUpdate {
    pub fn any(&self) -> bool {
        self.doc_changed || self.viewport_changed || self.focus_changed
    }
}

impl SyntaxSource for Document {
    fn doc_len(&self) -> usize {
        self.len_bytes()
    }

    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>> {
        Document::slice(self, range)
    }

    fn iterate_nodes(&self, range: Range<usize>, visit: &mut dyn FnMut(SyntaxNode<'_>)) {
        self.syntax_tree().iterate(range, visit);
    }
}

impl EditorState for Document {
    fn main_selection(&self) -> SelectionRange {
        self.selection
    }
}

#[derive(Debug, Clone)]
pub struct MarkdownView {
    pub document: Document,
    viewport: Viewport,
    focused: bool,
    pending: ViewUpdate,
}

impl MarkdownView {
    pub fn new(document: Document, viewport: Viewport) -> Self {
        Self {
            document,
            viewport,
            focused: true,
            pending: ViewUpdate::default(),
        }
    }

    /// A view showing the whole of `text`
    pub fn with_text(text: &str) -> Self {
        let document = Document::with_text(text);
        let lines = document.line_count();
        Self::new(document, Viewport::new(lines))
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.pending.viewport_changed = true;
        }
    }

    pub fn scroll_to(&mut self, line: usize) {
        if self.viewport.top_line != line {
            self.viewport.scroll_to(line);
            self.pending.viewport_changed = true;
        }
    }

    pub fn set_focus(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.pending.focus_changed = true;
        }
    }

    /// Move the main cursor to a byte offset
    pub fn set_cursor_offset(&mut self, offset: usize) {
        self.document.selection = SelectionRange::cursor(offset.min(self.document.len_bytes()));
    }

    pub fn cursor_offset(&self) -> usize {
        self.document.selection.head
    }

    /// Take and reset the pending change flags
    pub fn take_update(&mut self) -> ViewUpdate {
        std::mem::take(&mut self.pending)
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        if undone {
            self.pending.doc_changed = true;
        }
        undone
    }
}

impl EditorView for MarkdownView {
    type State = Document;

    fn state(&self) -> &Document {
        &self.document
    }

    fn visible_ranges(&self) -> Vec<Range<usize>> {
        self.viewport.visible_ranges(&self.document.buffer)
    }

    fn dispatch(&mut self, tx: Transaction) -> Result<(), EditError> {
        self.document.dispatch(tx)?;
        self.pending.doc_changed = true;
        Ok(())
    }

    fn focus(&mut self) {
        self.set_focus(true);
    }

    fn has_focus(&self) -> bool {
        self.focused
    }
}

impl Editor for MarkdownView {
    fn get_cursor(&self) -> Position {
        self.document.offset_to_position(self.document.selection.head)
    }

    fn pos_to_offset(&self, pos: Position) -> usize {
        self.document.position_to_offset(pos)
    }

    fn replace_range(&mut self, text: &str, at: Position) {
        let offset = self.document.position_to_offset(at);
        let tx = self.document.update(ChangeSpec::insert(offset, text), None);
        if let Err(e) = self.dispatch(tx) {
            tracing::warn!("Insert at {}:{} failed: {}", at.line, at.column, e);
        }
    }

    fn set_cursor(&mut self, pos: Position) {
        let offset = self.document.position_to_offset(pos);
        self.document.selection = SelectionRange::cursor(offset);
    }
}
