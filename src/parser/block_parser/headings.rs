//! ATX heading parsing.

use super::utils::leading_spaces;
use super::{Block, LineCursor};
use crate::render::{BlockContext, RenderOptions};

/// An ATX heading. Closes inside its start rule.
///
/// Rendered content is a literal passthrough: it is not routed through the
/// inline renderer like paragraph text, so emphasis or links inside a
/// heading stay verbatim. That matches the dialect being reproduced and is
/// kept deliberately, even though it looks like an oversight upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingBlock {
    /// 1 through 6.
    pub level: u8,
    pub content: String,
}

/// Try to parse an ATX heading line: up to 3 leading spaces, 1-6 `#`,
/// required space or tab, then the content, with an optional trailing run
/// of `#` (preceded by whitespace) stripped.
pub(crate) fn try_parse_atx_heading(line: &str) -> Option<(u8, String)> {
    if leading_spaces(line) > 3 {
        return None;
    }
    let trimmed = line.trim_start_matches(' ');

    let hash_count = trimmed.chars().take_while(|&c| c == '#').count();
    if hash_count == 0 || hash_count > 6 {
        return None;
    }

    // At least one space or tab must follow the marker.
    let after_hashes = &trimmed[hash_count..];
    if !after_hashes.starts_with(' ') && !after_hashes.starts_with('\t') {
        return None;
    }

    let mut content = after_hashes.trim_matches([' ', '\t']);

    // Strip a trailing closing run: `## Title ##` keeps just `Title`.
    let without_hashes = content.trim_end_matches('#');
    if without_hashes.len() < content.len()
        && (without_hashes.ends_with(' ') || without_hashes.ends_with('\t'))
    {
        content = without_hashes.trim_end_matches([' ', '\t']);
    }

    Some((hash_count as u8, content.to_string()))
}

/// Derive the element id from heading content: spaces become hyphens and
/// the result is lowercased. Punctuation is not stripped; `A, B` yields
/// `a,-b`. A known limitation of the dialect, preserved as-is.
pub(crate) fn slugify(content: &str) -> String {
    content.replace(' ', "-").to_lowercase()
}

impl HeadingBlock {
    /// Requires the heading line and a following blank line; consumes both.
    pub(crate) fn try_start(cursor: &mut LineCursor) -> Option<Block> {
        if cursor.remaining() < 2 || !cursor.peek_at(1).is_some_and(str::is_empty) {
            return None;
        }
        let (level, content) = try_parse_atx_heading(cursor.peek()?)?;
        cursor.advance(2);
        Some(Block::Heading(HeadingBlock { level, content }))
    }

    pub(crate) fn render(&self, _ctx: BlockContext, _opts: &RenderOptions) -> String {
        format!(
            "<h{0} id='{1}'>{2}</h{0}>\n",
            self.level,
            slugify(&self.content),
            self.content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;

    #[test]
    fn test_simple_heading() {
        assert_eq!(
            try_parse_atx_heading("# Heading"),
            Some((1, "Heading".to_string()))
        );
    }

    #[test]
    fn test_level_and_content() {
        assert_eq!(
            try_parse_atx_heading("### Level 3"),
            Some((3, "Level 3".to_string()))
        );
    }

    #[test]
    fn test_trailing_hashes_stripped() {
        assert_eq!(
            try_parse_atx_heading("## Title ##"),
            Some((2, "Title".to_string()))
        );
        // No separating whitespace: the run is part of the content.
        assert_eq!(
            try_parse_atx_heading("## Title##"),
            Some((2, "Title##".to_string()))
        );
    }

    #[test]
    fn test_no_space_after_hashes() {
        assert_eq!(try_parse_atx_heading("#NoSpace"), None);
    }

    #[test]
    fn test_level_7_invalid() {
        assert_eq!(try_parse_atx_heading("####### Too many"), None);
    }

    #[test]
    fn test_four_leading_spaces_invalid() {
        assert_eq!(try_parse_atx_heading("    # Indented"), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("A, B"), "a,-b");
    }

    #[test]
    fn test_start_requires_following_blank() {
        let input: Vec<String> = vec!["## Hello World".into(), "".into(), "x".into()];
        let mut cursor = LineCursor::new(&input);
        let block = HeadingBlock::try_start(&mut cursor).unwrap();
        assert_eq!(cursor.remaining(), 1);
        let Block::Heading(h) = &block else {
            unreachable!()
        };
        assert_eq!(h.level, 2);
        assert_eq!(h.content, "Hello World");

        let input: Vec<String> = vec!["## Hello".into(), "not blank".into()];
        let mut cursor = LineCursor::new(&input);
        assert!(HeadingBlock::try_start(&mut cursor).is_none());
    }

    #[test]
    fn test_render() {
        let h = HeadingBlock {
            level: 2,
            content: "Hello World".into(),
        };
        let opts = RenderOptions::default();
        assert_eq!(
            h.render(BlockContext::Document, &opts),
            "<h2 id='hello-world'>Hello World</h2>\n"
        );
    }
}
