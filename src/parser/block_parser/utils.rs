//! Shared utilities for block parsing.

/// Count leading space characters (not tabs).
pub(crate) fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|&c| c == ' ').count()
}

/// Strip at most `width` leading spaces from a line.
pub(crate) fn strip_indent(line: &str, width: usize) -> &str {
    let n = leading_spaces(line).min(width);
    &line[n..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_spaces() {
        assert_eq!(leading_spaces("abc"), 0);
        assert_eq!(leading_spaces("  abc"), 2);
        assert_eq!(leading_spaces("   "), 3);
        assert_eq!(leading_spaces("\tabc"), 0);
    }

    #[test]
    fn test_strip_indent() {
        assert_eq!(strip_indent("    code", 4), "code");
        assert_eq!(strip_indent("  code", 4), "code");
        assert_eq!(strip_indent("      code", 4), "  code");
        assert_eq!(strip_indent("code", 4), "code");
    }
}
