//! velum: an HTML exporter for Typora-flavored Markdown.
//!
//! The core is a block-level parsing engine: a priority-ordered set of
//! block grammars (paragraphs, dividers, headings, fenced code, pipe
//! tables, front matter, raw HTML, lists) driven by a single
//! line-consumption loop, followed by a structural rendering pass that
//! turns the finished tree back into HTML. Inline markup, math, and code
//! highlighting are pluggable capabilities supplied at render time.
//!
//! ```no_run
//! let result = velum::parse("# Title\n\nSome text.\n").unwrap();
//! let html = result.render_html(&velum::RenderOptions::default());
//! ```

pub mod config;
pub mod error;
pub mod outline;
pub mod parser;
pub mod render;

use std::collections::BTreeMap;

pub use error::ParseError;
pub use outline::TocEntry;
pub use parser::{Alignment, Block, LinkReference};
pub use render::{
    BlockContext, CodeRenderer, InlineRenderer, LatexRenderer, PlainCode, PlainInline, RawMath,
    RenderOptions,
};

use parser::block_parser::front_matter::FrontMatterBlock;
use parser::block_parser::{LineCursor, parse_blocks_at, reference_definitions};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The outcome of parsing one document: the block tree plus the two
/// read-only extraction passes. Immutable once produced; rendering reads
/// it but never mutates it.
#[derive(Debug)]
pub struct ParseResult {
    /// Top-level blocks in document order.
    pub blocks: Vec<Block>,
    /// Normalized label to link target; first definition wins.
    pub link_references: BTreeMap<String, LinkReference>,
    /// One entry per heading, in document order.
    pub toc_entries: Vec<TocEntry>,
}

/// Parse a whole document in one pass.
///
/// Never fails on ordinary malformed Markdown (the paragraph rule is an
/// unconditional fallback); fails only when a block's continuation
/// contract is violated (see [`ParseError`]).
pub fn parse(input: &str) -> Result<ParseResult, ParseError> {
    #[cfg(debug_assertions)]
    {
        init_logger();
    }

    let normalized = input.replace("\r\n", "\n");
    let lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();
    let mut cursor = LineCursor::new(&lines);

    let mut blocks = Vec::new();

    // Front matter is a one-shot grammar: tried exactly once, at document
    // start, before the ordinary priority scan ever runs.
    if let Some(front_matter) = FrontMatterBlock::process(&mut cursor) {
        blocks.push(Block::FrontMatter(front_matter));
    }

    blocks.extend(parse_blocks_at(&mut cursor)?);

    let link_references = reference_definitions::collect(&blocks);
    let toc_entries = outline::collect(&blocks);

    Ok(ParseResult {
        blocks,
        link_references,
        toc_entries,
    })
}
