//! HTML rendering.
//!
//! A depth-first walk over the finished tree. Each block renders itself
//! from its final state plus its immediate parent's context (the only
//! thing the context carries is whether the parent is a tight list item).
//! Inline markup, math, and code highlighting are pluggable capabilities;
//! the defaults are deterministic passthroughs so rendering the same tree
//! twice yields identical output.

use crate::ParseResult;
use crate::parser::Block;

/// The parent context handed to `Block::render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockContext {
    /// Top level of the document.
    Document,
    /// Directly inside a list item; `tight` controls whether child
    /// paragraphs get a `<p>` wrapper.
    ListItem { tight: bool },
}

/// Renders a block's stored text as inline HTML (emphasis, links, code
/// spans). The core only stores raw lines; everything span-level goes
/// through this seam.
pub trait InlineRenderer {
    fn render_inline(&self, text: &str) -> String;
}

/// Renders a math formula. `display` is true for block-level formulas.
pub trait LatexRenderer {
    fn render_math(&self, math: &str, display: bool) -> String;
}

/// Renders a fenced code block body. `info` is the fence's info string
/// (usually a language name); implementations may ignore it.
pub trait CodeRenderer {
    fn render_code(&self, code: &str, info: &str, line_numbers: bool) -> String;
}

/// Default inline renderer: verbatim passthrough.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainInline;

impl InlineRenderer for PlainInline {
    fn render_inline(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Default math renderer: keeps the formula source, delimiters included,
/// for client-side rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawMath;

impl LatexRenderer for RawMath {
    fn render_math(&self, math: &str, display: bool) -> String {
        if display {
            format!("<div class='md-math-block'>$${math}$$</div>\n")
        } else {
            format!("${math}$")
        }
    }
}

/// Default code renderer: no highlighting, no classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCode;

impl CodeRenderer for PlainCode {
    fn render_code(&self, code: &str, _info: &str, _line_numbers: bool) -> String {
        format!("<pre><code>{code}</code></pre>")
    }
}

/// Rendering options and plugin renderers.
pub struct RenderOptions {
    /// Omit dialect-specific wrappers and classes.
    pub vanilla_html: bool,
    /// Emit a full document shell (doctype, head, body).
    pub include_head: bool,
    /// Page title; only used when `include_head` is set.
    pub title: Option<String>,
    /// Raw markup appended to the head tag.
    pub extra_head_tags: Option<String>,
    /// Ask the code renderer for line numbers.
    pub code_line_numbers: bool,
    pub inline: Box<dyn InlineRenderer>,
    pub latex: Box<dyn LatexRenderer>,
    pub code: Box<dyn CodeRenderer>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            vanilla_html: false,
            include_head: false,
            title: None,
            extra_head_tags: None,
            code_line_numbers: false,
            inline: Box::new(PlainInline),
            latex: Box::new(RawMath),
            code: Box::new(PlainCode),
        }
    }
}

impl RenderOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_inline_renderer(mut self, inline: Box<dyn InlineRenderer>) -> Self {
        self.inline = inline;
        self
    }

    pub fn with_latex_renderer(mut self, latex: Box<dyn LatexRenderer>) -> Self {
        self.latex = latex;
        self
    }

    pub fn with_code_renderer(mut self, code: Box<dyn CodeRenderer>) -> Self {
        self.code = code;
        self
    }
}

impl Block {
    /// Render this block as an HTML fragment. Pure function of the
    /// block's final state, the parent context, and the options.
    pub fn render(&self, ctx: BlockContext, opts: &RenderOptions) -> String {
        match self {
            Block::Paragraph(b) => b.render(ctx, opts),
            Block::Divider(b) => b.render(ctx, opts),
            Block::Heading(b) => b.render(ctx, opts),
            Block::FencedCode(b) => b.render(ctx, opts),
            Block::Table(b) => b.render(ctx, opts),
            Block::FrontMatter(b) => b.render(ctx, opts),
            Block::Html(b) => b.render(ctx, opts),
            Block::List(b) => b.render(ctx, opts),
        }
    }
}

impl ParseResult {
    /// Render the parsed document to HTML.
    pub fn render_html(&self, opts: &RenderOptions) -> String {
        let fragments: String = self
            .blocks
            .iter()
            .map(|block| block.render(BlockContext::Document, opts))
            .collect();

        let body = if opts.vanilla_html {
            fragments
        } else {
            format!("<div id='write'>\n{fragments}</div>\n")
        };

        if !opts.include_head {
            return body;
        }

        let title = opts.title.as_deref().unwrap_or("");
        let extra = opts.extra_head_tags.as_deref().unwrap_or("");
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset='UTF-8'>\n\
             <title>{title}</title>\n{extra}</head>\n<body>\n{body}</body>\n</html>\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_deterministic() {
        let result = crate::parse("# Hi\n\ntext\n").unwrap();
        let opts = RenderOptions::default();
        assert_eq!(result.render_html(&opts), result.render_html(&opts));
    }

    #[test]
    fn test_vanilla_omits_write_wrapper() {
        let result = crate::parse("text\n").unwrap();
        let mut opts = RenderOptions::default();
        opts.vanilla_html = true;
        let html = result.render_html(&opts);
        assert!(!html.contains("<div id='write'>"));
        assert_eq!(html, "<p>text</p>\n");
    }

    #[test]
    fn test_head_shell() {
        let result = crate::parse("text\n").unwrap();
        let mut opts = RenderOptions::default().with_title("Doc");
        opts.include_head = true;
        opts.vanilla_html = true;
        opts.extra_head_tags = Some("<link rel='stylesheet' href='x.css'>\n".into());
        let html = result.render_html(&opts);
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>Doc</title>"));
        assert!(html.contains("<link rel='stylesheet'"));
        assert!(html.contains("<body>\n<p>text</p>\n</body>"));
    }

    #[test]
    fn test_custom_code_renderer_receives_info() {
        struct Tagged;
        impl CodeRenderer for Tagged {
            fn render_code(&self, code: &str, info: &str, line_numbers: bool) -> String {
                format!("<pre data-lang='{info}' data-ln='{line_numbers}'>{code}</pre>")
            }
        }
        let result = crate::parse("```py\nx\n```\n").unwrap();
        let mut opts = RenderOptions::default().with_code_renderer(Box::new(Tagged));
        opts.vanilla_html = true;
        opts.code_line_numbers = true;
        assert_eq!(
            result.render_html(&opts),
            "<pre data-lang='py' data-ln='true'>x\n</pre>\n"
        );
    }
}
