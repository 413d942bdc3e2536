//! Parse errors.

use thiserror::Error;

/// Errors surfaced by the block-tree builder.
///
/// Ordinary malformed Markdown never errors (the paragraph rule absorbs
/// anything); this fires only when an open block's continuation contract
/// is violated, which the grammar treats as unrecoverable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed input: expected {expected}, found {found:?} at line {line}")]
    MalformedInputAssumption {
        expected: &'static str,
        found: String,
        /// 1-based line number in the line supply the builder was run
        /// over. For a block nested in a list item this counts within
        /// the item's own marker-stripped lines, not the document.
        line: usize,
    },
}
