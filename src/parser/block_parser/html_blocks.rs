//! HTML block parsing.
//!
//! A trimmed-down version of the CommonMark HTML block conditions: only
//! the raw-text container rule, the comment rule, and the block-tag
//! allow-list rule exist in this dialect, and the allow-list rule ends at
//! the first blank line whether or not the tag was ever closed.

use super::{Block, Continuation, LineCursor};
use crate::render::{BlockContext, RenderOptions};

/// Block-level tag names for the allow-list rule.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "base", "basefont", "blockquote", "body",
    "caption", "center", "col", "colgroup", "dd", "details", "dialog", "dir",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head", "header",
    "hr", "html", "iframe", "legend", "li", "link", "main", "menu", "menuitem",
    "nav", "noframes", "ol", "optgroup", "option", "p", "param", "section",
    "source", "summary", "table", "tbody", "td", "tfoot", "th", "thead",
    "title", "tr", "track", "ul",
];

/// Tags whose content is raw text until the matching close tag appears.
const RAW_TEXT_TAGS: &[&str] = &["pre", "script", "style", "textarea"];

/// The start/end rule pair bound to an HTML block for its lifetime.
/// Checked in declaration order; the first matching start rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlCondition {
    /// `<pre>`, `<script>`, `<style>`, `<textarea>`: ends when a line
    /// contains the corresponding closing tag.
    RawText,
    /// `<!--`: ends when a line contains `-->`.
    Comment,
    /// An allow-listed block-level tag (opening or closing): ends at the
    /// first blank line.
    BlockTag,
}

impl HtmlCondition {
    pub(crate) fn starts(line: &str) -> Option<HtmlCondition> {
        if starts_with_tag(line, RAW_TEXT_TAGS, false) {
            return Some(HtmlCondition::RawText);
        }
        if line.starts_with("<!--") {
            return Some(HtmlCondition::Comment);
        }
        if starts_with_tag(line, BLOCK_TAGS, true) {
            return Some(HtmlCondition::BlockTag);
        }
        None
    }

    pub(crate) fn is_end(self, line: &str) -> bool {
        match self {
            HtmlCondition::RawText => {
                let lower = line.to_lowercase();
                RAW_TEXT_TAGS
                    .iter()
                    .any(|tag| lower.contains(&format!("</{tag}>")))
            }
            HtmlCondition::Comment => line.contains("-->"),
            HtmlCondition::BlockTag => line.is_empty(),
        }
    }
}

/// Check whether `line` opens with `<tag` (or `</tag` when closing tags
/// are accepted) for any tag in `tags`, followed by a space, tab, `>`,
/// `/>`, or end of line. Case-insensitive.
fn starts_with_tag(line: &str, tags: &[&str], allow_closing: bool) -> bool {
    let Some(after_bracket) = line.strip_prefix('<') else {
        return false;
    };
    let name_part = if allow_closing {
        after_bracket.strip_prefix('/').unwrap_or(after_bracket)
    } else {
        after_bracket
    };

    let name_end = name_part
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(name_part.len());
    let name = name_part[..name_end].to_lowercase();
    if !tags.contains(&name.as_str()) {
        return false;
    }

    match name_part[name_end..].chars().next() {
        None => true,
        Some(' ') | Some('\t') | Some('>') => true,
        Some('/') => name_part[name_end..].starts_with("/>"),
        Some(_) => false,
    }
}

/// A raw HTML block: verbatim, unescaped passthrough of its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlBlock {
    condition: HtmlCondition,
    pub lines: Vec<String>,
    open: bool,
}

impl HtmlBlock {
    pub(crate) fn try_start(cursor: &mut LineCursor) -> Option<Block> {
        let first = cursor.peek()?;
        let condition = HtmlCondition::starts(first)?;
        let mut block = HtmlBlock {
            condition,
            lines: vec![first.to_string()],
            open: true,
        };
        cursor.advance(1);

        // A start line that already satisfies its own end test closes the
        // block immediately (e.g. a one-line comment).
        if condition.is_end(first) {
            block.close();
            if cursor.peek().is_some_and(str::is_empty) {
                cursor.advance(1);
            }
        }
        Some(Block::Html(block))
    }

    pub(crate) fn append(&mut self, cursor: &mut LineCursor) -> Continuation {
        let Some(line) = cursor.take() else {
            self.close();
            return Continuation::Consumed;
        };
        if self.condition.is_end(line) {
            if !line.is_empty() {
                self.lines.push(line.to_string());
            }
            self.close();
            if cursor.peek().is_some_and(str::is_empty) {
                cursor.advance(1);
            }
        } else {
            self.lines.push(line.to_string());
        }
        Continuation::Consumed
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    pub(crate) fn render(&self, _ctx: BlockContext, _opts: &RenderOptions) -> String {
        let mut html = self.lines.join("\n");
        html.push('\n');
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_raw_text_condition_wins_over_allow_list() {
        assert_eq!(HtmlCondition::starts("<pre>"), Some(HtmlCondition::RawText));
        assert_eq!(
            HtmlCondition::starts("<script src='x'>"),
            Some(HtmlCondition::RawText)
        );
    }

    #[test]
    fn test_comment_condition() {
        assert_eq!(
            HtmlCondition::starts("<!-- note"),
            Some(HtmlCondition::Comment)
        );
    }

    #[test]
    fn test_block_tag_condition() {
        assert_eq!(HtmlCondition::starts("<div>"), Some(HtmlCondition::BlockTag));
        assert_eq!(
            HtmlCondition::starts("</table>"),
            Some(HtmlCondition::BlockTag)
        );
        assert_eq!(
            HtmlCondition::starts("<div class='x'>"),
            Some(HtmlCondition::BlockTag)
        );
        assert_eq!(HtmlCondition::starts("<DIV>"), Some(HtmlCondition::BlockTag));
    }

    #[test]
    fn test_non_block_tags_do_not_match() {
        assert_eq!(HtmlCondition::starts("<span>"), None);
        assert_eq!(HtmlCondition::starts("<divx>"), None);
        assert_eq!(HtmlCondition::starts("plain text"), None);
    }

    #[test]
    fn test_block_tag_ends_at_blank_line() {
        let input = lines(&["<div>", "text", "", "more"]);
        let mut cursor = LineCursor::new(&input);
        let Block::Html(mut html) = HtmlBlock::try_start(&mut cursor).unwrap() else {
            unreachable!()
        };
        html.append(&mut cursor);
        assert!(html.is_open());
        html.append(&mut cursor);
        assert!(!html.is_open());
        assert_eq!(html.lines, vec!["<div>", "text"]);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_one_line_comment_closes_immediately() {
        let input = lines(&["<!-- note -->", "", "x"]);
        let mut cursor = LineCursor::new(&input);
        let block = HtmlBlock::try_start(&mut cursor).unwrap();
        assert!(!block.is_open());
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_raw_text_runs_past_blank_lines() {
        let input = lines(&["<script>", "let x = 1;", "", "done();", "</script>"]);
        let mut cursor = LineCursor::new(&input);
        let Block::Html(mut html) = HtmlBlock::try_start(&mut cursor).unwrap() else {
            unreachable!()
        };
        while html.is_open() && !cursor.is_empty() {
            html.append(&mut cursor);
        }
        assert!(!html.is_open());
        assert_eq!(html.lines.len(), 5);
    }

    #[test]
    fn test_render_is_verbatim() {
        let html = HtmlBlock {
            condition: HtmlCondition::BlockTag,
            lines: vec!["<div>".into(), "text".into()],
            open: false,
        };
        let opts = RenderOptions::default();
        assert_eq!(
            html.render(BlockContext::Document, &opts),
            "<div>\ntext\n"
        );
    }
}
