//! Paragraph parsing: the unconditional fallback rule.

use super::{Block, Continuation, LineCursor};
use crate::render::{BlockContext, RenderOptions};

/// A run of text lines terminated by a blank line.
///
/// The start rule always matches, which is what guarantees the builder
/// makes forward progress on every input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParagraphBlock {
    pub lines: Vec<String>,
    open: bool,
}

impl ParagraphBlock {
    /// Always matches. Two consecutive blank lines become a closed, empty
    /// paragraph (rendered as a spacing placeholder); anything else opens a
    /// paragraph holding the first line.
    pub(crate) fn try_start(cursor: &mut LineCursor) -> Block {
        let mut paragraph = ParagraphBlock::default();
        if cursor.remaining() >= 2
            && cursor.peek().is_some_and(str::is_empty)
            && cursor.peek_at(1).is_some_and(str::is_empty)
        {
            cursor.advance(2);
        } else {
            paragraph.lines.push(cursor.take().unwrap_or_default().to_string());
            paragraph.open = true;
        }
        Block::Paragraph(paragraph)
    }

    pub(crate) fn append(&mut self, cursor: &mut LineCursor) -> Continuation {
        match cursor.peek() {
            Some("") => {
                // The blank terminator is consumed, not left for rematching.
                cursor.advance(1);
                self.close();
            }
            Some(line) => {
                self.lines.push(line.to_string());
                cursor.advance(1);
            }
            None => self.close(),
        }
        Continuation::Consumed
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn is_effectively_empty(&self) -> bool {
        self.lines.is_empty() || (self.lines.len() == 1 && self.lines[0].is_empty())
    }

    pub(crate) fn render(&self, ctx: BlockContext, opts: &RenderOptions) -> String {
        let text = self.text();

        // A paragraph that is nothing but a display formula is handed to
        // the math renderer whole, with no paragraph wrapper.
        if let Some(inner) = text
            .trim()
            .strip_prefix("$$")
            .and_then(|t| t.strip_suffix("$$"))
            && !inner.is_empty()
        {
            return opts.latex.render_math(inner.trim(), true);
        }

        if matches!(ctx, BlockContext::ListItem { tight: true }) {
            return opts.inline.render_inline(&text);
        }

        if self.is_effectively_empty() {
            // Placeholder paragraph preserving vertical spacing.
            "<p>&nbsp;</p>\n".to_string()
        } else {
            format!("<p>{}</p>\n", opts.inline.render_inline(&text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_start_consumes_one_line() {
        let input = lines(&["hello", "world"]);
        let mut cursor = LineCursor::new(&input);
        let block = ParagraphBlock::try_start(&mut cursor);
        assert!(block.is_open());
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_double_blank_is_closed_empty_paragraph() {
        let input = lines(&["", "", "x"]);
        let mut cursor = LineCursor::new(&input);
        let block = ParagraphBlock::try_start(&mut cursor);
        assert!(!block.is_open());
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_blank_line_closes() {
        let input = lines(&["a", "b", "", "c"]);
        let mut cursor = LineCursor::new(&input);
        let Block::Paragraph(mut p) = ParagraphBlock::try_start(&mut cursor) else {
            unreachable!()
        };
        p.append(&mut cursor);
        assert!(p.is_open());
        p.append(&mut cursor);
        assert!(!p.is_open());
        assert_eq!(p.lines, vec!["a", "b"]);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_render_wraps_text() {
        let p = ParagraphBlock {
            lines: vec!["hi".into()],
            open: false,
        };
        let opts = RenderOptions::default();
        assert_eq!(p.render(BlockContext::Document, &opts), "<p>hi</p>\n");
    }

    #[test]
    fn test_render_empty_placeholder() {
        let p = ParagraphBlock::default();
        let opts = RenderOptions::default();
        assert_eq!(p.render(BlockContext::Document, &opts), "<p>&nbsp;</p>\n");
    }

    #[test]
    fn test_render_tight_item_has_no_wrapper() {
        let p = ParagraphBlock {
            lines: vec!["hi".into()],
            open: false,
        };
        let opts = RenderOptions::default();
        assert_eq!(
            p.render(BlockContext::ListItem { tight: true }, &opts),
            "hi"
        );
    }

    #[test]
    fn test_render_display_math_goes_to_latex_renderer() {
        let p = ParagraphBlock {
            lines: vec!["$$x^2$$".into()],
            open: false,
        };
        let opts = RenderOptions::default();
        let html = p.render(BlockContext::Document, &opts);
        assert!(html.contains("x^2"));
        assert!(!html.starts_with("<p>"));
    }
}
