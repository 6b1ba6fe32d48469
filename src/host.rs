//! Seams between the decoration core and the editor that hosts it
//!
//! The core never owns a document, a viewport or a native control. It reads
//! and writes them through these traits; [`crate::view::MarkdownView`] and
//! [`crate::decoration::HeadlessDateInput`] are the in-crate implementations.

use std::borrow::Cow;
use std::ops::Range;

use crate::model::{EditError, Position, SelectionRange, Transaction};
use crate::syntax::SyntaxNode;

/// Read access to document text and its syntax tree
pub trait SyntaxSource {
    /// Document length in bytes
    fn doc_len(&self) -> usize;

    /// Text of a byte range; `None` when out of bounds or not on char boundaries
    fn slice(&self, range: Range<usize>) -> Option<Cow<'_, str>>;

    /// Visit syntax nodes intersecting `range`, in document order
    fn iterate_nodes(&self, range: Range<usize>, visit: &mut dyn FnMut(SyntaxNode<'_>));
}

/// Editor state as seen at edit time
pub trait EditorState: SyntaxSource {
    fn main_selection(&self) -> SelectionRange;
}

/// The live editor view the widgets are mounted in
pub trait EditorView {
    type State: EditorState;

    fn state(&self) -> &Self::State;

    /// Disjoint visible byte ranges, ascending
    fn visible_ranges(&self) -> Vec<Range<usize>>;

    /// Submit a change; the view's document validates it
    fn dispatch(&mut self, tx: Transaction) -> Result<(), EditError>;

    /// Move keyboard focus back to the main editing surface
    fn focus(&mut self);

    fn has_focus(&self) -> bool;
}

/// Options for focusing a native control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusOptions {
    pub prevent_scroll: bool,
}

/// A native date-input primitive (`<input type="date">` or equivalent)
pub trait DateControl {
    fn set_input_type(&mut self, input_type: &str);

    fn add_class(&mut self, class: &str);

    /// Set the ISO `YYYY-MM-DD` value
    fn set_value(&mut self, value: &str);

    /// Current ISO value; empty when the user cleared it
    fn value(&self) -> String;

    fn focus(&mut self, options: FocusOptions);

    fn blur(&mut self);

    /// Open the calendar overlay
    fn show_picker(&mut self);
}

/// Line/column cursor API used by editor commands
pub trait Editor {
    fn get_cursor(&self) -> Position;

    fn pos_to_offset(&self, pos: Position) -> usize;

    /// Insert `text` at `at`
    fn replace_range(&mut self, text: &str, at: Position);

    fn set_cursor(&mut self, pos: Position);
}
