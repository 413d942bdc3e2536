//! List containers.
//!
//! A list owns an ordered sequence of items; each item buffers its
//! marker-stripped lines while the list is open and builds its child
//! blocks by running the block builder over that buffer when the list
//! closes. A list is loose when a blank line separated two pieces of its
//! content during construction; looseness is fixed at close and controls
//! whether child paragraphs render with a `<p>` wrapper.

use super::utils::{leading_spaces, strip_indent};
use super::{Block, Continuation, LineCursor, parse_blocks};
use crate::error::ParseError;
use crate::render::{BlockContext, RenderOptions};

/// A parsed list marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListMarker {
    pub(crate) ordered: bool,
    /// Column where the item's own content starts; continuation lines are
    /// stripped by this width.
    pub(crate) content_col: usize,
}

/// Try to parse a list marker: up to 3 leading spaces, then a bullet
/// (`-`, `*`, `+`) or digits followed by `.` or `)`, then at least one
/// space. Returns the marker and the text after it.
pub(crate) fn try_parse_list_marker(line: &str) -> Option<(ListMarker, &str)> {
    let indent = leading_spaces(line);
    if indent > 3 {
        return None;
    }
    let rest = &line[indent..];

    let (marker_len, ordered) = if let Some(first) = rest.chars().next()
        && matches!(first, '-' | '*' | '+')
    {
        (1, false)
    } else {
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 || digits > 9 {
            return None;
        }
        match rest[digits..].chars().next() {
            Some('.') | Some(')') => (digits + 1, true),
            _ => return None,
        }
    };

    let after_marker = &rest[marker_len..];
    let spaces = leading_spaces(after_marker);
    if spaces == 0 {
        return None;
    }

    let content_col = indent + marker_len + spaces;
    Some((
        ListMarker {
            ordered,
            content_col,
        },
        &after_marker[spaces..],
    ))
}

/// One list item: a buffer of marker-stripped lines while the list is
/// open, a built child sequence afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListItem {
    raw_lines: Vec<String>,
    content_col: usize,
    pub children: Vec<Block>,
}

/// A bullet or ordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListBlock {
    pub items: Vec<ListItem>,
    pub ordered: bool,
    pub is_loose: bool,
    open: bool,
    pending_blank: bool,
}

impl ListBlock {
    pub(crate) fn try_start(cursor: &mut LineCursor) -> Option<Block> {
        let (marker, text) = try_parse_list_marker(cursor.peek()?)?;
        cursor.advance(1);
        Some(Block::List(ListBlock {
            items: vec![ListItem {
                raw_lines: vec![text.to_string()],
                content_col: marker.content_col,
                children: Vec::new(),
            }],
            ordered: marker.ordered,
            is_loose: false,
            open: true,
            pending_blank: false,
        }))
    }

    pub(crate) fn append(&mut self, cursor: &mut LineCursor) -> Result<Continuation, ParseError> {
        let Some(line) = cursor.peek() else {
            self.close()?;
            return Ok(Continuation::Consumed);
        };
        let current_col = self.items.last().map_or(0, |item| item.content_col);

        if line.is_empty() {
            // A blank line either separates list content (making the list
            // loose) or terminates it, depending on what follows.
            let continues = cursor.peek_at(1).is_some_and(|next| {
                try_parse_list_marker(next).is_some() || leading_spaces(next) >= current_col
            });
            cursor.advance(1);
            if continues {
                self.pending_blank = true;
                // Keep the blank inside the current item so a following
                // indented continuation starts a fresh child paragraph.
                if cursor
                    .peek()
                    .is_some_and(|next| leading_spaces(next) >= current_col)
                    && let Some(item) = self.items.last_mut()
                {
                    item.raw_lines.push(String::new());
                }
            } else {
                self.close()?;
            }
            return Ok(Continuation::Consumed);
        }

        // Indented continuation of the current item (checked before the
        // marker rule so nested markers stay inside the item).
        if leading_spaces(line) >= current_col {
            if let Some(item) = self.items.last_mut() {
                item.raw_lines.push(strip_indent(line, current_col).to_string());
            }
            if self.pending_blank {
                self.is_loose = true;
                self.pending_blank = false;
            }
            cursor.advance(1);
            return Ok(Continuation::Consumed);
        }

        // A sibling item.
        if let Some((marker, text)) = try_parse_list_marker(line) {
            if self.pending_blank {
                self.is_loose = true;
                self.pending_blank = false;
            }
            self.items.push(ListItem {
                raw_lines: vec![text.to_string()],
                content_col: marker.content_col,
                children: Vec::new(),
            });
            cursor.advance(1);
            return Ok(Continuation::Consumed);
        }

        // The line belongs to whatever comes after the list.
        Ok(Continuation::Refused)
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    /// Close the list and build each item's children from its buffered
    /// lines. Idempotent.
    pub(crate) fn close(&mut self) -> Result<(), ParseError> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        for item in &mut self.items {
            while item.raw_lines.last().is_some_and(String::is_empty) {
                item.raw_lines.pop();
            }
            item.children = parse_blocks(&item.raw_lines)?;
        }
        Ok(())
    }

    pub(crate) fn render(&self, _ctx: BlockContext, opts: &RenderOptions) -> String {
        let tag = if self.ordered { "ol" } else { "ul" };
        let child_ctx = BlockContext::ListItem {
            tight: !self.is_loose,
        };
        let items: String = self
            .items
            .iter()
            .map(|item| {
                let inner: String = item
                    .children
                    .iter()
                    .map(|child| child.render(child_ctx, opts))
                    .collect();
                format!("<li>{inner}</li>\n")
            })
            .collect();
        format!("<{tag}>\n{items}</{tag}>\n")
    }
}
