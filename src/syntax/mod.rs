//! Markdown link syntax
//!
//! Node kinds follow the HyperMD token names used by Markdown editors for
//! wiki links, so `[[2024-01-15]]` yields:
//!
//! ```text
//! [[          formatting-link_formatting-link-start
//! 2024-01-15  hmd-internal-link
//! ]]          formatting-link_formatting-link-end
//! ```
//!
//! An aliased link `[[target|alias]]` tags the target
//! `hmd-internal-link_link-has-alias`, so anything matching on the
//! [`INTERNAL_LINK`] prefix sees the target and never the alias.
//!
//! [`MarkdownTree`] produces these nodes from a full Markdown parse.

mod markdown;

use std::ops::Range;

pub use markdown::MarkdownTree;

pub const LINK_START: &str = "formatting-link_formatting-link-start";
pub const LINK_END: &str = "formatting-link_formatting-link-end";
pub const INTERNAL_LINK: &str = "hmd-internal-link";
pub const INTERNAL_LINK_WITH_ALIAS: &str = "hmd-internal-link_link-has-alias";
pub const ALIAS_PIPE: &str = "link-alias-pipe";
pub const ALIAS: &str = "link-alias";

/// A typed, offset-bounded node from the document's structural parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxNode<'a> {
    pub kind: &'a str,
    /// Start byte offset
    pub from: usize,
    /// End byte offset (exclusive)
    pub to: usize,
}

impl SyntaxNode<'_> {
    pub fn range(&self) -> Range<usize> {
        self.from..self.to
    }

    /// Whether this node is (part of) an internal link target
    pub fn is_internal_link(&self) -> bool {
        self.kind.starts_with(INTERNAL_LINK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_link_prefix() {
        let node = |kind| SyntaxNode { kind, from: 0, to: 1 };
        assert!(node(INTERNAL_LINK).is_internal_link());
        assert!(node(INTERNAL_LINK_WITH_ALIAS).is_internal_link());
        assert!(!node(ALIAS).is_internal_link());
        assert!(!node(LINK_START).is_internal_link());
    }
}
