//! Embedded minified-block detection
//!
//! Within text that may already be partly formatted, finds rule blocks
//! that still look minified and re-runs the full formatter on just those
//! spans. Matching is non-overlapping and left-to-right, with no
//! recursion into already-expanded output.

use regex::Captures;

use crate::format::format_css;
use crate::format::patterns::MINIFIED_BLOCK_RE;

/// A candidate span is reformatted only when it packs more than one
/// declaration onto fewer than two lines. Both thresholds are literal
/// tuning constants inherited from the original tool.
fn looks_minified(block: &str) -> bool {
    block.matches(';').count() > 1 && block.matches('\n').count() < 2
}

/// Reformat still-minified rule blocks inside `content`, leaving
/// everything else untouched.
#[must_use]
pub fn format_minified_sections(content: &str, indent_size: usize) -> String {
    MINIFIED_BLOCK_RE
        .replace_all(content, |caps: &Captures<'_>| {
            let block = &caps[0];
            if looks_minified(block) {
                format_css(block, indent_size)
            } else {
                block.to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minified_block_is_expanded() {
        let out = format_minified_sections("a{color:red;background:blue;}", 4);
        assert_eq!(out, "a {\n    color:red;\n    background:blue;\n}\n\n");
    }

    #[test]
    fn test_single_declaration_left_alone() {
        // Only one semicolon: fails the density check even though the
        // block pattern matches (one `;` plus one `:`)
        let input = "a{color:red;}";
        assert_eq!(format_minified_sections(input, 4), input);
    }

    #[test]
    fn test_already_formatted_block_left_alone() {
        // Two or more newlines inside the span: not minified
        let input = "a{color:red;\nbackground:blue;\nmargin:0;}";
        assert_eq!(format_minified_sections(input, 4), input);
    }

    #[test]
    fn test_only_minified_span_touched() {
        let input = "/* header */\nb{margin:0;padding:0;}\n";
        let out = format_minified_sections(input, 4);
        assert!(out.starts_with("/* header */\n"));
        assert!(out.contains("b {\n    margin:0;\n    padding:0;\n}"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let input = "no css here";
        assert_eq!(format_minified_sections(input, 4), input);
    }
}
