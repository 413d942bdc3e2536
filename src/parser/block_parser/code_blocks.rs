//! Fenced code block parsing.

use super::utils::{leading_spaces, strip_indent};
use super::{Block, Continuation, LineCursor};
use crate::render::{BlockContext, RenderOptions};

/// A fenced code block. Lines are stored verbatim (after indent
/// stripping) and never routed through the inline renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCodeBlock {
    /// Indent of the opening fence; up to this many leading spaces are
    /// stripped from every continuation line.
    pub indent: usize,
    /// The exact run of fence characters that opened the block. The
    /// closing line must equal it exactly (after indent stripping).
    pub fence_token: String,
    pub info_string: String,
    pub lines: Vec<String>,
    open: bool,
}

/// Try to parse a fence opener: up to 3 leading spaces, a run of 3+
/// backticks or tildes, then an optional space-trimmed info string.
pub(crate) fn try_parse_fence_open(line: &str) -> Option<(usize, &str, &str)> {
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];

    let fence_char = rest.chars().next()?;
    if fence_char != '`' && fence_char != '~' {
        return None;
    }
    let fence_len = rest.chars().take_while(|&c| c == fence_char).count();
    if fence_len < 3 {
        return None;
    }

    let info = rest[fence_len..].trim_matches(' ');
    Some((indent, &rest[..fence_len], info))
}

impl FencedCodeBlock {
    pub(crate) fn try_start(cursor: &mut LineCursor) -> Option<Block> {
        let (indent, token, info) = try_parse_fence_open(cursor.peek()?)?;
        let block = FencedCodeBlock {
            indent,
            fence_token: token.to_string(),
            info_string: info.to_string(),
            lines: Vec::new(),
            open: true,
        };
        cursor.advance(1);
        Some(Block::FencedCode(block))
    }

    pub(crate) fn append(&mut self, cursor: &mut LineCursor) -> Continuation {
        let Some(line) = cursor.take() else {
            self.close();
            return Continuation::Consumed;
        };
        let stripped = strip_indent(line, self.indent);
        if stripped == self.fence_token {
            self.close();
            // A single blank after the closing fence belongs to the block.
            if cursor.peek().is_some_and(str::is_empty) {
                cursor.advance(1);
            }
        } else {
            self.lines.push(stripped.to_string());
        }
        Continuation::Consumed
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    /// Newline-joined body with a trailing newline.
    pub fn body(&self) -> String {
        let mut body = self.lines.join("\n");
        body.push('\n');
        body
    }

    pub(crate) fn render(&self, _ctx: BlockContext, opts: &RenderOptions) -> String {
        let mut html = opts
            .code
            .render_code(&self.body(), &self.info_string, opts.code_line_numbers);
        // The fragment-separating newline is added here, not by the plugin.
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
    fn test_fence_open_backticks() {
        assert_eq!(try_parse_fence_open("```py"), Some((0, "```", "py")));
        assert_eq!(try_parse_fence_open("````"), Some((0, "````", "")));
    }

    #[test]
    fn test_fence_open_tildes_and_indent() {
        assert_eq!(try_parse_fence_open("  ~~~ rust "), Some((2, "~~~", "rust")));
        assert_eq!(try_parse_fence_open("    ```"), None);
    }

    #[test]
    fn test_fence_open_too_short() {
        assert_eq!(try_parse_fence_open("``py"), None);
        assert_eq!(try_parse_fence_open("text"), None);
    }

    #[test]
    fn test_block_closes_on_exact_token() {
        let input = lines(&["```py", "a:=1", "```", ""]);
        let mut cursor = LineCursor::new(&input);
        let Block::FencedCode(mut code) = FencedCodeBlock::try_start(&mut cursor).unwrap() else {
            unreachable!()
        };
        assert_eq!(code.fence_token, "```");
        assert_eq!(code.info_string, "py");
        code.append(&mut cursor);
        code.append(&mut cursor);
        assert!(!code.is_open());
        // The trailing blank is consumed with the closing fence.
        assert!(cursor.is_empty());
        assert_eq!(code.body(), "a:=1\n");
    }

    #[test]
    fn test_longer_run_does_not_close() {
        let input = lines(&["```", "````", "```"]);
        let mut cursor = LineCursor::new(&input);
        let Block::FencedCode(mut code) = FencedCodeBlock::try_start(&mut cursor).unwrap() else {
            unreachable!()
        };
        code.append(&mut cursor);
        assert!(code.is_open());
        code.append(&mut cursor);
        assert!(!code.is_open());
        assert_eq!(code.lines, vec!["````"]);
    }

    #[test]
    fn test_indent_stripping() {
        let input = lines(&["  ```", "    x", "  ```"]);
        let mut cursor = LineCursor::new(&input);
        let Block::FencedCode(mut code) = FencedCodeBlock::try_start(&mut cursor).unwrap() else {
            unreachable!()
        };
        code.append(&mut cursor);
        code.append(&mut cursor);
        assert!(!code.is_open());
        // Only the fence indent (2) is stripped, deeper indent survives.
        assert_eq!(code.lines, vec!["  x"]);
    }

    #[test]
    fn test_render_plain() {
        let code = FencedCodeBlock {
            indent: 0,
            fence_token: "```".into(),
            info_string: "py".into(),
            lines: vec!["a:=1".into()],
            open: false,
        };
        let opts = RenderOptions::default();
        assert_eq!(
            code.render(BlockContext::Document, &opts),
            "<pre><code>a:=1\n</code></pre>\n"
        );
    }
}
