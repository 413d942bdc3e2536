//! Link reference definitions.
//!
//! Definitions have the form:
//! ```markdown
//! [label]: url "optional title"
//! [label]: <url> 'optional title'
//! [label]: url (optional title)
//! ```
//!
//! They are collected in a read-only pass over the finished tree for later
//! inline link resolution; the defining lines themselves stay part of
//! whatever paragraph holds them.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Block;

/// The target a reference label resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    pub target: String,
    pub title: Option<String>,
}

/// Normalize a reference label: trimmed, lowercased, interior whitespace
/// collapsed. Lookups are case-insensitive.
pub(crate) fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Try to parse a single-line reference definition.
/// Returns `(label, target, title)` on success.
pub(crate) fn try_parse_reference_definition(
    line: &str,
) -> Option<(String, String, Option<String>)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }

    let after_bracket = trimmed.strip_prefix('[')?;

    // Find the closing bracket, honoring backslash escapes.
    let mut close = None;
    let mut escape = false;
    for (i, ch) in after_bracket.char_indices() {
        if escape {
            escape = false;
        } else if ch == '\\' {
            escape = true;
        } else if ch == ']' {
            close = Some(i);
            break;
        }
    }
    let close = close?;
    let label = &after_bracket[..close];
    if label.is_empty() || label.starts_with('^') {
        // Empty labels and footnote definitions are not link references.
        return None;
    }

    let after_label = after_bracket[close + 1..].strip_prefix(':')?;
    let rest = after_label.trim();
    if rest.is_empty() {
        return None;
    }

    let (target_raw, remainder) = match rest.find(char::is_whitespace) {
        Some(i) => (&rest[..i], rest[i..].trim()),
        None => (rest, ""),
    };
    let target = target_raw
        .strip_prefix('<')
        .and_then(|t| t.strip_suffix('>'))
        .unwrap_or(target_raw);

    let title = if remainder.is_empty() {
        None
    } else {
        Some(parse_title(remainder)?)
    };

    Some((label.to_string(), target.to_string(), title))
}

/// A title is the remainder wrapped in `"…"`, `'…'`, or `(…)`.
fn parse_title(text: &str) -> Option<String> {
    let inner = match text.chars().next()? {
        '"' => text.strip_prefix('"')?.strip_suffix('"'),
        '\'' => text.strip_prefix('\'')?.strip_suffix('\''),
        '(' => text.strip_prefix('(')?.strip_suffix(')'),
        _ => return None,
    }?;
    Some(inner.to_string())
}

/// Walk the finished tree and collect every definition found in paragraph
/// text, recursing into containers. The first definition of a label wins.
pub(crate) fn collect(blocks: &[Block]) -> BTreeMap<String, LinkReference> {
    let mut references = BTreeMap::new();
    collect_into(blocks, &mut references);
    references
}

fn collect_into(blocks: &[Block], references: &mut BTreeMap<String, LinkReference>) {
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => {
                for line in &paragraph.lines {
                    if let Some((label, target, title)) = try_parse_reference_definition(line) {
                        references
                            .entry(normalize_label(&label))
                            .or_insert(LinkReference { target, title });
                    }
                }
            }
            Block::List(list) => {
                for item in &list.items {
                    collect_into(&item.children, references);
                }
            }
            _ => {}
        }
    }
}
