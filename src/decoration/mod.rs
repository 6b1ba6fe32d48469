//! Date decorations
//!
//! ## Architecture
//!
//! ```text
//! visible ranges → builder::build → DecorationSet + Vec<DateWidget>
//!                                 → PickerLayer::sync → RenderedPicker (owns the control)
//!                                 → user picks a date → one Transaction
//! ```
//!
//! [`DateWidget`] is the immutable description; [`RenderedPicker`] is the
//! interactive instance built from it.

pub mod builder;
pub mod render;
pub mod widget;

use std::ops::Range;

pub use builder::{build, normalize_ranges, BuildOutput};
pub use render::{
    HeadlessDateInput, PickerEvent, PickerLayer, PickerOutcome, PickerState, RenderedPicker,
    INPUT_CLASS,
};
pub use widget::{DateWidget, Wrapping, DELIMITER_WIDTH};

/// A zero-width replacement anchored at `at` that hides `hidden`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Anchor offset: start of the matched syntax node
    pub at: usize,
    /// Document text the widget is drawn in place of
    pub hidden: Range<usize>,
    pub widget: DateWidget,
}

/// Immutable, anchor-ordered set of decorations from one rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecorationSet {
    decorations: Vec<Decoration>,
}

impl DecorationSet {
    pub fn new(mut decorations: Vec<Decoration>) -> Self {
        decorations.sort_by_key(|d| d.at);
        Self { decorations }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.decorations.iter()
    }

    /// The decoration whose hidden range contains `offset`
    pub fn at_offset(&self, offset: usize) -> Option<&Decoration> {
        self.decorations
            .iter()
            .find(|d| d.widget.contains(offset))
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.decorations.iter()
    }
}
