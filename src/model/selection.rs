//! Positions and selections
//!
//! Two coordinate systems are in play:
//! - [`Position`]: line and char column, both 0-indexed (command-level cursor API)
//! - byte offsets: what the syntax scan, decorations and transactions use

/// A position in the text buffer (line and column, both 0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// The main selection, in byte offsets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// Where the selection started (fixed point)
    pub anchor: usize,
    /// Where the cursor is (moving point)
    pub head: usize,
}

impl SelectionRange {
    /// An empty selection (plain cursor) at `offset`
    pub const fn cursor(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub const fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Map both ends through a replacement of `from..to` by `inserted` bytes.
    ///
    /// Offsets before the change stay put, offsets after it shift by the
    /// length delta, offsets inside it land at the end of the insertion.
    pub fn map_through(&self, from: usize, to: usize, inserted: usize) -> Self {
        let map = |offset: usize| {
            if offset < from {
                offset
            } else if offset >= to {
                offset - (to - from) + inserted
            } else {
                from + inserted
            }
        };
        Self {
            anchor: map(self.anchor),
            head: map(self.head),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_empty() {
        let sel = SelectionRange::cursor(5);
        assert!(sel.is_empty());
        assert_eq!(sel.start(), 5);
        assert_eq!(sel.end(), 5);
    }

    #[test]
    fn test_start_end_reversed_selection() {
        let sel = SelectionRange::new(9, 3);
        assert_eq!(sel.start(), 3);
        assert_eq!(sel.end(), 9);
    }

    #[test]
    fn test_map_through_before_change() {
        let sel = SelectionRange::cursor(2);
        assert_eq!(sel.map_through(5, 10, 3), SelectionRange::cursor(2));
    }

    #[test]
    fn test_map_through_after_change_shifts() {
        let sel = SelectionRange::cursor(12);
        assert_eq!(sel.map_through(5, 10, 3), SelectionRange::cursor(10));
    }

    #[test]
    fn test_map_through_inside_change_lands_at_end() {
        let sel = SelectionRange::cursor(7);
        assert_eq!(sel.map_through(5, 10, 3), SelectionRange::cursor(8));
    }
}
