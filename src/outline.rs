//! Table-of-contents extraction.
//!
//! A read-only pass over the finished tree collecting every heading in
//! document order. Nesting is implied by the levels; no tree of entries is
//! materialized.

use serde::Serialize;

use crate::parser::Block;
use crate::parser::block_parser::headings::slugify;

/// One table-of-contents entry, derived from a heading block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

/// Collect TOC entries from the tree, recursing into containers.
pub(crate) fn collect(blocks: &[Block]) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    collect_into(blocks, &mut entries);
    entries
}

fn collect_into(blocks: &[Block], entries: &mut Vec<TocEntry>) {
    for block in blocks {
        match block {
            Block::Heading(heading) => entries.push(TocEntry {
                level: heading.level,
                text: heading.content.clone(),
                slug: slugify(&heading.content),
            }),
            Block::List(list) => {
                for item in &list.items {
                    collect_into(&item.children, entries);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::block_parser::parse_blocks;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_headings_in_document_order() {
        let input = lines(&["# One", "", "text", "", "## Two", "", "# Three", ""]);
        let blocks = parse_blocks(&input).unwrap();
        let toc = collect(&blocks);
        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0].level, 1);
        assert_eq!(toc[1].level, 2);
        assert_eq!(toc[1].text, "Two");
        assert_eq!(toc[1].slug, "two");
        assert_eq!(toc[2].text, "Three");
    }

    #[test]
    fn test_slug_preserves_punctuation() {
        let input = lines(&["## A, B", "", "x", ""]);
        let blocks = parse_blocks(&input).unwrap();
        let toc = collect(&blocks);
        assert_eq!(toc[0].slug, "a,-b");
    }
}
