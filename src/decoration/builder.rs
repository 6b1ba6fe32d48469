//! Viewport-bounded decoration builder
//!
//! Each rebuild is a full recomputation over the visible ranges only. The
//! document is never written to and nothing is cached between rebuilds.

use std::ops::Range;

use crate::date::{self, DateFormat};
use crate::host::SyntaxSource;
use crate::syntax::SyntaxNode;

use super::widget::{DateWidget, Wrapping, DELIMITER_WIDTH, LINK_CLOSE, LINK_OPEN};
use super::{Decoration, DecorationSet};

/// Result of one rebuild
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub decorations: DecorationSet,
    /// The widgets in document order, for point queries
    pub widgets: Vec<DateWidget>,
}

/// Sort visible ranges and merge any that overlap or touch
pub fn normalize_ranges(ranges: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut sorted: Vec<Range<usize>> = ranges.to_vec();
    sorted.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Scan the visible ranges of `source` for date links.
///
/// Overlapping input ranges are merged first and nodes are only accepted in
/// strictly increasing start order, so a node is decorated at most once.
pub fn build<S: SyntaxSource + ?Sized>(
    source: &S,
    visible_ranges: &[Range<usize>],
    format: &DateFormat,
) -> BuildOutput {
    let mut decorations: Vec<Decoration> = Vec::new();
    let mut widgets: Vec<DateWidget> = Vec::new();
    let mut last_from: Option<usize> = None;
    let mut scanned = 0usize;

    for range in normalize_ranges(visible_ranges) {
        source.iterate_nodes(range, &mut |node| {
            if !node.is_internal_link() {
                return;
            }
            if last_from.is_some_and(|last| node.from <= last) {
                return;
            }
            scanned += 1;

            let Some(widget) = widget_for_node(source, node, format) else {
                return;
            };
            last_from = Some(node.from);

            decorations.push(Decoration {
                at: node.from,
                hidden: widget.range(),
                widget: widget.clone(),
            });
            widgets.push(widget);
        });
    }

    tracing::debug!(
        scanned,
        matched = widgets.len(),
        format = %format,
        "built date decorations"
    );

    BuildOutput {
        decorations: DecorationSet::new(decorations),
        widgets,
    }
}

/// Recognise one candidate node and bind a widget to it
fn widget_for_node<S: SyntaxSource + ?Sized>(
    source: &S,
    node: SyntaxNode<'_>,
    format: &DateFormat,
) -> Option<DateWidget> {
    let text = source.slice(node.range())?;
    let date = date::recognize(&text, format)?;
    let (wrapping, range) = enclosing_delimiters(source, node);
    Some(DateWidget::new(
        range.start,
        range.end,
        date,
        format.clone(),
        wrapping,
    ))
}

/// The bound range for a node: expanded over `[[`/`]]` when both are present
fn enclosing_delimiters<S: SyntaxSource + ?Sized>(
    source: &S,
    node: SyntaxNode<'_>,
) -> (Wrapping, Range<usize>) {
    let Some(outer_from) = node.from.checked_sub(DELIMITER_WIDTH) else {
        return (Wrapping::Bare, node.range());
    };
    let outer_to = node.to + DELIMITER_WIDTH;

    let opens = source.slice(outer_from..node.from).as_deref() == Some(LINK_OPEN);
    let closes = source.slice(node.to..outer_to).as_deref() == Some(LINK_CLOSE);

    if opens && closes {
        (Wrapping::Link, outer_from..outer_to)
    } else {
        (Wrapping::Bare, node.range())
    }
}
