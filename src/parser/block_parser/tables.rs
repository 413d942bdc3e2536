//! Pipe table parsing.

use super::{Block, Continuation, LineCursor};
use crate::error::ParseError;
use crate::render::{BlockContext, RenderOptions};

/// Column alignment from the delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// A pipe table. The header row is pre-loaded by the start rule; body rows
/// accumulate while the block is open and a blank line closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub alignments: Vec<Alignment>,
    /// Row 0 is the header.
    pub rows: Vec<Vec<String>>,
    open: bool,
}

/// Split a row into cells. Pipes escaped as `\|` are literal characters,
/// not separators; cells are the trimmed spans between consecutive
/// unescaped pipes.
pub(crate) fn split_row(line: &str) -> Vec<String> {
    let mut pipe_indexes: Vec<usize> = Vec::new();
    let mut escape = false;
    for (i, ch) in line.char_indices() {
        if escape {
            escape = false;
        } else if ch == '\\' {
            escape = true;
        } else if ch == '|' {
            pipe_indexes.push(i);
        }
    }

    let mut cells = Vec::new();
    for pair in pipe_indexes.windows(2) {
        cells.push(line[pair[0] + 1..pair[1]].trim().to_string());
    }
    cells
}

/// Try to parse a delimiter row: a sequence of cells shaped
/// `| :?-+:? ` with at least 2 cells, where removing every matched cell
/// leaves exactly one trailing `|`.
pub(crate) fn try_parse_delimiter_row(line: &str) -> Option<Vec<Alignment>> {
    let mut alignments = Vec::new();
    let mut rest = line;

    loop {
        let Some(consumed) = try_parse_delimiter_cell(rest) else {
            break;
        };
        let (len, alignment) = consumed;
        alignments.push(alignment);
        rest = &rest[len..];
    }

    if alignments.len() >= 2 && rest == "|" {
        Some(alignments)
    } else {
        None
    }
}

/// Match one delimiter cell at the head of `text`: a pipe, optional
/// spaces, optional colon, 1+ dashes, optional colon, optional spaces.
/// Returns the matched length and the alignment it encodes.
fn try_parse_delimiter_cell(text: &str) -> Option<(usize, Alignment)> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if bytes.first() != Some(&b'|') {
        return None;
    }
    pos += 1;

    while bytes.get(pos) == Some(&b' ') {
        pos += 1;
    }

    let colon_before = bytes.get(pos) == Some(&b':');
    if colon_before {
        pos += 1;
    }

    let dash_start = pos;
    while bytes.get(pos) == Some(&b'-') {
        pos += 1;
    }
    if pos == dash_start {
        return None;
    }

    let colon_after = bytes.get(pos) == Some(&b':');
    if colon_after {
        pos += 1;
    }

    while bytes.get(pos) == Some(&b' ') {
        pos += 1;
    }

    let alignment = match (colon_before, colon_after) {
        (true, true) => Alignment::Center,
        (false, true) => Alignment::Right,
        _ => Alignment::Left,
    };
    Some((pos, alignment))
}

impl TableBlock {
    /// Matches when line 2 is a valid delimiter row and line 1 splits into
    /// the same number of cells; consumes both.
    pub(crate) fn try_start(cursor: &mut LineCursor) -> Option<Block> {
        if cursor.remaining() < 2 {
            return None;
        }
        let alignments = try_parse_delimiter_row(cursor.peek_at(1)?)?;
        let header = split_row(cursor.peek()?);
        if header.len() != alignments.len() {
            return None;
        }
        cursor.advance(2);
        Some(Block::Table(TableBlock {
            alignments,
            rows: vec![header],
            open: true,
        }))
    }

    pub(crate) fn append(&mut self, cursor: &mut LineCursor) -> Result<Continuation, ParseError> {
        let line_number = cursor.line_number();
        let Some(line) = cursor.peek() else {
            self.close();
            return Ok(Continuation::Consumed);
        };

        if line.starts_with('|') {
            self.rows.push(split_row(line));
            cursor.advance(1);
            return Ok(Continuation::Consumed);
        }

        // The continuation contract only allows rows or a blank
        // terminator. Anything else aborts the parse instead of being
        // silently reinterpreted.
        if !line.is_empty() {
            return Err(ParseError::MalformedInputAssumption {
                expected: "a table row starting with '|' or a blank line",
                found: line.to_string(),
                line: line_number,
            });
        }

        cursor.advance(1);
        self.close();
        Ok(Continuation::Consumed)
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    fn alignment_style(alignment: Alignment) -> &'static str {
        match alignment {
            Alignment::Left => "",
            Alignment::Center => " style='text-align:center;' ",
            Alignment::Right => " style='text-align:right;' ",
        }
    }

    fn render_row(&self, index: usize) -> String {
        let tag = if index == 0 { "th" } else { "td" };
        let cells: String = self.rows[index]
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let style = self
                    .alignments
                    .get(i)
                    .copied()
                    .map(Self::alignment_style)
                    .unwrap_or("");
                format!("<{tag}{style}>{cell}</{tag}>")
            })
            .collect();
        format!("<tr>{cells}</tr>")
    }

    pub(crate) fn render(&self, _ctx: BlockContext, _opts: &RenderOptions) -> String {
        let head = format!("<thead>\n{}</thead>\n", self.render_row(0));
        let body: String = (1..self.rows.len()).map(|i| self.render_row(i)).collect();
        format!(
            "<figure><table>\n{head}<tbody>{body}</tbody>\n</table></figure>\n"
        )
    }
}
