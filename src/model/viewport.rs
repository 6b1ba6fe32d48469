//! Viewport state - what portion of the document is visible
//!
//! A viewport covers a window of lines. Folded line ranges inside that window
//! split it, so the visible region can be several disjoint byte ranges.

use std::ops::Range;

use ropey::Rope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// First visible line (0-indexed)
    pub top_line: usize,
    /// Number of lines that fit in the viewport
    pub visible_lines: usize,
    /// Folded line ranges (end exclusive); their text is not rendered
    pub folds: Vec<Range<usize>>,
}

impl Viewport {
    /// Create a new viewport showing `visible_lines` lines from the top
    pub fn new(visible_lines: usize) -> Self {
        Self {
            top_line: 0,
            visible_lines,
            folds: Vec::new(),
        }
    }

    /// Byte ranges of the rendered text, ascending and disjoint
    pub fn visible_ranges(&self, buffer: &Rope) -> Vec<Range<usize>> {
        let total_lines = buffer.len_lines();
        let first = self.top_line.min(total_lines);
        let last = self.top_line.saturating_add(self.visible_lines).min(total_lines);

        let mut ranges: Vec<Range<usize>> = Vec::new();
        let mut line = first;
        while line < last {
            if let Some(fold) = self.folds.iter().find(|f| f.contains(&line)) {
                line = fold.end.max(line + 1);
                continue;
            }
            let start = buffer.line_to_byte(line);
            let end = line_end_byte(buffer, line);
            match ranges.last_mut() {
                // Extend across the newline that joins consecutive lines
                Some(prev) if prev.end + newline_len(buffer, line - 1) >= start => {
                    prev.end = end;
                }
                _ => ranges.push(start..end),
            }
            line += 1;
        }
        ranges
    }

    /// Scroll so `line` is the first visible line
    pub fn scroll_to(&mut self, line: usize) {
        self.top_line = line;
    }
}

/// Byte offset of the end of `line`, excluding its line break
fn line_end_byte(buffer: &Rope, line: usize) -> usize {
    let start = buffer.line_to_byte(line);
    let slice = buffer.line(line);
    start + slice.len_bytes() - newline_len(buffer, line)
}

fn newline_len(buffer: &Rope, line: usize) -> usize {
    let slice = buffer.line(line);
    let len = slice.len_chars();
    if len > 0 && slice.char(len - 1) == '\n' {
        if len > 1 && slice.char(len - 2) == '\r' {
            2
        } else {
            1
        }
    } else {
        0
    }
}
