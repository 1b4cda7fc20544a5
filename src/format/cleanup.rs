//! Blank-line normalization
//!
//! The splitter puts a blank line after every `}`; combined with blank
//! lines already present in the source this over-inserts. Runs of two or
//! more blank lines (whitespace-only lines included) collapse to one.

use crate::format::patterns::BLANK_RUN_RE;

/// Collapse runs of 2+ consecutive blank lines down to exactly one.
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN_RE.replace_all(text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_newline_collapses() {
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_long_run_collapses() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        assert_eq!(collapse_blank_lines("a\n  \n\t\nb"), "a\n\nb");
    }

    #[test]
    fn test_single_blank_line_kept() {
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_no_blank_lines_untouched() {
        assert_eq!(collapse_blank_lines("a\nb\nc"), "a\nb\nc");
    }
}
