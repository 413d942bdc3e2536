//! Block-tree builder.
//!
//! Consumes a document's lines and incrementally builds a tree of typed
//! blocks. Every block kind implements the same four-operation contract:
//!
//! - `try_start(cursor)` recognizes the kind at the head of the line
//!   supply, consuming only what it owns (returns `None` on an ordinary
//!   grammar mismatch),
//! - `append(cursor)` consumes continuation lines while the block is open,
//!   closing the block when its terminator is recognized,
//! - `close()` flips the block to immutable (idempotent),
//! - `render(ctx, opts)` produces an HTML fragment from the final state.
//!
//! The builder feeds each line to the innermost open block. If the block
//! refuses the line, it is closed and the full priority-ordered start scan
//! runs again against the unchanged position, so arbitrary interleavings of
//! block kinds work without any kind knowing about the others.

use crate::error::ParseError;

pub mod code_blocks;
pub mod dividers;
pub mod front_matter;
pub mod headings;
pub mod html_blocks;
pub mod lists;
pub mod paragraphs;
pub mod reference_definitions;
pub mod tables;
mod utils;

use code_blocks::FencedCodeBlock;
use dividers::DividerBlock;
use front_matter::FrontMatterBlock;
use headings::HeadingBlock;
use html_blocks::HtmlBlock;
use lists::ListBlock;
use paragraphs::ParagraphBlock;
use tables::TableBlock;

/// A read cursor over the document's lines.
///
/// Lines are pre-split and hold no trailing newline. Start rules may peek
/// arbitrarily far ahead but only advance the cursor for lines they
/// semantically own.
pub(crate) struct LineCursor<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(lines: &'a [String]) -> Self {
        Self { lines, pos: 0 }
    }

    /// The next unconsumed line, if any.
    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(String::as_str)
    }

    /// Look ahead `n` lines past the current position.
    pub(crate) fn peek_at(&self, n: usize) -> Option<&'a str> {
        self.lines.get(self.pos + n).map(String::as_str)
    }

    /// All unconsumed lines, for whole-document forward scans.
    pub(crate) fn rest(&self) -> &'a [String] {
        &self.lines[self.pos..]
    }

    pub(crate) fn remaining(&self) -> usize {
        self.lines.len() - self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Consume and return the next line.
    pub(crate) fn take(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).map(String::as_str);
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    pub(crate) fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.lines.len());
    }

    /// 1-based line number of the current position, for diagnostics.
    pub(crate) fn line_number(&self) -> usize {
        self.pos + 1
    }
}

/// Outcome of feeding a line to an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Continuation {
    /// The block consumed one or more lines (and may have closed itself).
    Consumed,
    /// The line cannot extend this block; the caller must close the block
    /// and retry matching from the unchanged position. Most kinds close
    /// themselves and never refuse; the variant exists for the contract.
    Refused,
}

/// A node in the document tree. A closed set of variants, one per grammar
/// rule, dispatched statically.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Divider(DividerBlock),
    Heading(HeadingBlock),
    FencedCode(FencedCodeBlock),
    Table(TableBlock),
    FrontMatter(FrontMatterBlock),
    Html(HtmlBlock),
    List(ListBlock),
}

impl Block {
    pub fn is_open(&self) -> bool {
        match self {
            Block::Paragraph(b) => b.is_open(),
            Block::Divider(_) => false,
            Block::Heading(_) => false,
            Block::FencedCode(b) => b.is_open(),
            Block::Table(b) => b.is_open(),
            Block::FrontMatter(b) => b.is_open(),
            Block::Html(b) => b.is_open(),
            Block::List(b) => b.is_open(),
        }
    }

    pub(crate) fn append(&mut self, cursor: &mut LineCursor) -> Result<Continuation, ParseError> {
        debug_assert!(self.is_open(), "append on a closed block");
        match self {
            Block::Paragraph(b) => Ok(b.append(cursor)),
            Block::FencedCode(b) => Ok(b.append(cursor)),
            Block::Table(b) => b.append(cursor),
            Block::FrontMatter(b) => Ok(b.append(cursor)),
            Block::Html(b) => Ok(b.append(cursor)),
            Block::List(b) => b.append(cursor),
            // These close inside their start rule and never reach here.
            Block::Divider(_) | Block::Heading(_) => Ok(Continuation::Refused),
        }
    }

    /// Close the block. Idempotent; containers finalize their children
    /// here, which is where a nested contract violation can surface.
    pub(crate) fn close(&mut self) -> Result<(), ParseError> {
        match self {
            Block::Paragraph(b) => b.close(),
            Block::FencedCode(b) => b.close(),
            Block::Table(b) => b.close(),
            Block::FrontMatter(b) => b.close(),
            Block::Html(b) => b.close(),
            Block::List(b) => return b.close(),
            Block::Divider(_) | Block::Heading(_) => {}
        }
        Ok(())
    }
}

/// Try each block kind against the head of the cursor, in priority order.
/// The paragraph rule always matches, so this consumes at least one line.
fn start_block(cursor: &mut LineCursor) -> Block {
    // Front matter is deliberately absent: it is tried once, at document
    // start, before this scan ever runs.
    if let Some(block) = DividerBlock::try_start(cursor) {
        return block;
    }
    if let Some(block) = HeadingBlock::try_start(cursor) {
        return block;
    }
    if let Some(block) = FencedCodeBlock::try_start(cursor) {
        return block;
    }
    if let Some(block) = TableBlock::try_start(cursor) {
        return block;
    }
    if let Some(block) = HtmlBlock::try_start(cursor) {
        return block;
    }
    if let Some(block) = ListBlock::try_start(cursor) {
        return block;
    }
    ParagraphBlock::try_start(cursor)
}

/// Run the builder loop over a line supply until it is exhausted.
///
/// Containers call back into this to build their children from
/// marker-stripped lines.
pub(crate) fn parse_blocks(lines: &[String]) -> Result<Vec<Block>, ParseError> {
    let mut cursor = LineCursor::new(lines);
    parse_blocks_at(&mut cursor)
}

pub(crate) fn parse_blocks_at(cursor: &mut LineCursor) -> Result<Vec<Block>, ParseError> {
    let mut blocks: Vec<Block> = Vec::new();

    while !cursor.is_empty() {
        if let Some(open) = blocks.last_mut().filter(|b| b.is_open()) {
            match open.append(cursor)? {
                Continuation::Consumed => continue,
                Continuation::Refused => {
                    log::debug!(
                        "block refused line {}; closing and rematching",
                        cursor.line_number()
                    );
                    open.close()?;
                    continue;
                }
            }
        }

        log::trace!("matching at line {}: {:?}", cursor.line_number(), cursor.peek());
        blocks.push(start_block(cursor));
    }

    // End of input closes whatever is still open.
    if let Some(open) = blocks.last_mut().filter(|b| b.is_open()) {
        open.close()?;
    }

    Ok(blocks)
}
