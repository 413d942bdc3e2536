//! Front matter extraction.

use super::{Continuation, LineCursor};
use crate::render::{BlockContext, RenderOptions};

const OPEN_DELIMITER: &str = "---";
const CLOSE_DELIMITERS: [&str; 2] = ["---", "..."];

/// A metadata preamble delimited by bare marker lines. Stored verbatim and
/// never rendered; it exists so the delimiters and their payload do not
/// leak into ordinary block parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrontMatterBlock {
    pub lines: Vec<String>,
    open: bool,
}

impl FrontMatterBlock {
    /// One-shot extraction at document start: match, then drive the block
    /// to completion before ordinary parsing begins.
    pub(crate) fn process(cursor: &mut LineCursor) -> Option<FrontMatterBlock> {
        let mut block = Self::try_start(cursor)?;
        while block.is_open() {
            block.append(cursor);
        }
        Some(block)
    }

    /// The first line must be exactly the opening delimiter, and a closing
    /// delimiter must exist somewhere later in the document. The forward
    /// scan runs once, here; without it a divider at document start would
    /// swallow the rest of the file.
    fn try_start(cursor: &mut LineCursor) -> Option<FrontMatterBlock> {
        if cursor.peek()? != OPEN_DELIMITER {
            return None;
        }
        let has_closer = cursor.rest()[1..]
            .iter()
            .any(|line| CLOSE_DELIMITERS.contains(&line.as_str()));
        if !has_closer {
            return None;
        }
        cursor.advance(1);
        Some(FrontMatterBlock {
            lines: Vec::new(),
            open: true,
        })
    }

    pub(crate) fn append(&mut self, cursor: &mut LineCursor) -> Continuation {
        let Some(line) = cursor.take() else {
            self.close();
            return Continuation::Consumed;
        };
        if CLOSE_DELIMITERS.contains(&line) {
            self.close();
            // A single blank after the closing delimiter belongs here.
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

    /// Front matter never contributes to the HTML output.
    pub(crate) fn render(&self, _ctx: BlockContext, _opts: &RenderOptions) -> String {
        String::new()
    }
}
