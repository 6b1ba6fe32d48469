//! Markdown syntax tree built with pulldown-cmark
//!
//! Only wiki links are kept. Block structure comes from the parser, so text
//! in code spans, fenced blocks and indented blocks never yields link nodes.

use std::ops::Range;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};

use super::{
    SyntaxNode, ALIAS, ALIAS_PIPE, INTERNAL_LINK, INTERNAL_LINK_WITH_ALIAS, LINK_END, LINK_START,
};

const OPEN: &str = "[[";
const CLOSE: &str = "]]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Node {
    kind: &'static str,
    from: usize,
    to: usize,
}

/// Link nodes of one document revision, in document order
#[derive(Debug, Clone, Default)]
pub struct MarkdownTree {
    nodes: Vec<Node>,
}

impl MarkdownTree {
    pub fn parse(source: &str) -> Self {
        let options = Options::ENABLE_WIKILINKS
            | Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;

        let mut nodes = Vec::new();
        for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
            // `![[...]]` embeds arrive as images and are not links
            if let Event::Start(Tag::Link {
                link_type: LinkType::WikiLink { .. },
                ..
            }) = event
            {
                push_wiki_link(&mut nodes, source, range);
            }
        }

        // Drop zero-length parts such as the target of `[[|x]]`
        nodes.retain(|node| node.from < node.to);
        nodes.sort_by_key(|node| node.from);
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visit every node that intersects `range` (byte offsets, ends inclusive)
    pub fn iterate(&self, range: Range<usize>, visit: &mut dyn FnMut(SyntaxNode<'_>)) {
        // Link parts never overlap, so `to` ascends along with `from`
        let first = self.nodes.partition_point(|node| node.to < range.start);
        for node in self.nodes[first..]
            .iter()
            .take_while(|node| node.from <= range.end)
        {
            visit(SyntaxNode {
                kind: node.kind,
                from: node.from,
                to: node.to,
            });
        }
    }
}

/// Split one `[[target|alias]]` span into HyperMD-style nodes
fn push_wiki_link(nodes: &mut Vec<Node>, source: &str, range: Range<usize>) {
    let Some(inner) = source
        .get(range.clone())
        .and_then(|raw| raw.strip_prefix(OPEN))
        .and_then(|raw| raw.strip_suffix(CLOSE))
    else {
        tracing::trace!(?range, "wiki link without [[ ]] delimiters, skipped");
        return;
    };

    let inner_start = range.start + OPEN.len();
    let inner_end = inner_start + inner.len();

    nodes.push(Node {
        kind: LINK_START,
        from: range.start,
        to: inner_start,
    });
    match inner.find('|') {
        Some(pipe) => {
            let pipe_at = inner_start + pipe;
            nodes.push(Node {
                kind: INTERNAL_LINK_WITH_ALIAS,
                from: inner_start,
                to: pipe_at,
            });
            nodes.push(Node {
                kind: ALIAS_PIPE,
                from: pipe_at,
                to: pipe_at + 1,
            });
            nodes.push(Node {
                kind: ALIAS,
                from: pipe_at + 1,
                to: inner_end,
            });
        }
        None => nodes.push(Node {
            kind: INTERNAL_LINK,
            from: inner_start,
            to: inner_end,
        }),
    }
    nodes.push(Node {
        kind: LINK_END,
        from: inner_end,
        to: range.end,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(&'static str, &str)> {
        let tree = MarkdownTree::parse(text);
        let mut seen = Vec::new();
        tree.iterate(0..text.len(), &mut |node| {
            seen.push((
                &*Box::leak(node.kind.to_owned().into_boxed_str()),
                &text[node.from..node.to],
            ))
        });
        seen
    }

    fn targets(text: &str) -> Vec<&str> {
        kinds(text)
            .into_iter()
            .filter(|(kind, _)| kind.starts_with(INTERNAL_LINK))
            .map(|(_, span)| span)
            .collect()
    }

    #[test]
    fn test_plain_wiki_link() {
        assert_eq!(
            kinds("see [[2024-01-15]] ok"),
            vec![
                (LINK_START, "[["),
                (INTERNAL_LINK, "2024-01-15"),
                (LINK_END, "]]"),
            ]
        );
    }

    #[test]
    fn test_aliased_link() {
        assert_eq!(
            kinds("[[2024-01-15|Monday]]"),
            vec![
                (LINK_START, "[["),
                (INTERNAL_LINK_WITH_ALIAS, "2024-01-15"),
                (ALIAS_PIPE, "|"),
                (ALIAS, "Monday"),
                (LINK_END, "]]"),
            ]
        );
    }

    #[test]
    fn test_code_span_is_skipped() {
        assert!(targets("`[[2024-01-15]]`").is_empty());
        assert_eq!(targets("``a`b`` [[x]]"), vec!["x"]);
    }

    #[test]
    fn test_code_span_across_lines_is_skipped() {
        assert!(targets("`a\n[[2024-01-15]] b`").is_empty());
    }

    #[test]
    fn test_fenced_code_block_is_skipped() {
        assert!(targets("```md\n[[2024-01-15]]\n```\n").is_empty());
        assert_eq!(targets("~~~\n[[a]]\n~~~\n\n[[b]]"), vec!["b"]);
    }

    #[test]
    fn test_indented_code_block_is_skipped() {
        assert!(targets("para\n\n    [[2024-01-16]]\n").is_empty());
    }

    #[test]
    fn test_embed_is_skipped() {
        assert!(targets("![[2024-01-15]]").is_empty());
    }

    #[test]
    fn test_unclosed_link_is_text() {
        assert!(targets("[[open").is_empty());
    }

    #[test]
    fn test_links_in_lists_and_headings() {
        assert_eq!(
            targets("# [[a]]\n\n- [[b]]\n- text [[c]]\n"),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_offsets_are_absolute() {
        let text = "first\n\n[[a]] [[b]]\n";
        let tree = MarkdownTree::parse(text);
        let mut seen = Vec::new();
        tree.iterate(0..text.len(), &mut |node| {
            if node.kind == INTERNAL_LINK {
                seen.push(node.from..node.to);
            }
        });
        assert_eq!(seen, vec![9..10, 15..16]);
    }

    #[test]
    fn test_iterate_respects_range() {
        let text = "[[a]]\n[[b]]\n[[c]]\n";
        let tree = MarkdownTree::parse(text);
        let mut seen = Vec::new();
        tree.iterate(7..10, &mut |node| {
            if node.kind == INTERNAL_LINK {
                seen.push(node.from);
            }
        });
        assert_eq!(seen, vec![8]);
    }
}
