//! Thematic break (divider) parsing.

use super::{Block, LineCursor};
use super::utils::leading_spaces;
use crate::render::{BlockContext, RenderOptions};

/// A horizontal rule. Closes inside its start rule and never takes
/// continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DividerBlock;

/// A divider is up to 3 leading spaces, then 3+ repetitions of one of
/// `*`, `-`, or `_`, optionally separated by spaces or tabs, and nothing
/// else on the line.
pub(crate) fn try_parse_divider(line: &str) -> bool {
    if leading_spaces(line) > 3 {
        return false;
    }
    let trimmed = line.trim_start_matches(' ');

    let Some(rule_char) = trimmed.chars().next() else {
        return false;
    };
    if !matches!(rule_char, '*' | '-' | '_') {
        return false;
    }

    let mut count = 0;
    for ch in trimmed.chars() {
        match ch {
            c if c == rule_char => count += 1,
            ' ' | '\t' => continue,
            _ => return false,
        }
    }
    count >= 3
}

impl DividerBlock {
    /// Requires the rule line and a following blank line; consumes both.
    pub(crate) fn try_start(cursor: &mut LineCursor) -> Option<Block> {
        if cursor.remaining() >= 2
            && cursor.peek_at(1).is_some_and(str::is_empty)
            && cursor.peek().is_some_and(try_parse_divider)
        {
            cursor.advance(2);
            Some(Block::Divider(DividerBlock))
        } else {
            None
        }
    }

    pub(crate) fn render(&self, _ctx: BlockContext, _opts: &RenderOptions) -> String {
        "<hr />\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asterisk_rule() {
        assert!(try_parse_divider("***"));
        assert!(try_parse_divider("* * *"));
        assert!(try_parse_divider("****"));
    }

    #[test]
    fn test_dash_and_underscore_rules() {
        assert!(try_parse_divider("---"));
        assert!(try_parse_divider("- - -"));
        assert!(try_parse_divider("___"));
        assert!(try_parse_divider("_ \t_ _"));
    }

    #[test]
    fn test_too_few_characters() {
        assert!(!try_parse_divider("**"));
        assert!(!try_parse_divider("--"));
    }

    #[test]
    fn test_mixed_characters_rejected() {
        assert!(!try_parse_divider("*-*"));
        assert!(!try_parse_divider("--- x"));
    }

    #[test]
    fn test_leading_indent_limit() {
        assert!(try_parse_divider("   ***"));
        assert!(!try_parse_divider("    ***"));
    }

    #[test]
    fn test_start_requires_following_blank() {
        let with_blank: Vec<String> = vec!["***".into(), "".into(), "x".into()];
        let mut cursor = LineCursor::new(&with_blank);
        assert!(DividerBlock::try_start(&mut cursor).is_some());
        assert_eq!(cursor.remaining(), 1);

        let without_blank: Vec<String> = vec!["***".into(), "x".into()];
        let mut cursor = LineCursor::new(&without_blank);
        assert!(DividerBlock::try_start(&mut cursor).is_none());
        assert_eq!(cursor.remaining(), 2);
    }
}
