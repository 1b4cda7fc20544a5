//! CSS text formatting.
//!
//! This module contains the core formatting logic organized into submodules:
//! - [`patterns`]: Compiled regex patterns shared by the passes
//! - [`splitter`]: Inserts newlines at structural boundaries (braces, semicolons, selectors)
//! - [`indenter`]: Assigns leading whitespace from brace nesting depth
//! - [`cleanup`]: Collapses runs of blank lines left by over-splitting
//! - [`minified`]: Finds still-minified rule blocks in partly formatted text
//!
//! The formatter is total: it never fails for any string input. Malformed
//! CSS produces visually wrong but structurally intact output.

pub mod cleanup;
pub mod indenter;
pub mod minified;
pub mod patterns;
pub mod splitter;

pub use cleanup::collapse_blank_lines;
pub use indenter::apply_indentation;
pub use minified::format_minified_sections;
pub use splitter::split_structure;

/// Format a CSS text blob: structural splitting, depth indentation,
/// blank-line collapse, in that order.
///
/// `indent_size` is the number of spaces per nesting level.
#[must_use]
pub fn format_css(css: &str, indent_size: usize) -> String {
    let split = split_structure(css);
    let indented = apply_indentation(&split, indent_size);
    collapse_blank_lines(&indented)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rule() {
        let out = format_css("a{color:red;background:blue}", 4);
        assert_eq!(out, "a {\n    color:red;\n    background:blue}\n\n");
    }

    #[test]
    fn test_nested_rule_depths() {
        let out = format_css("a{b{c:1;}}", 4);
        assert_eq!(out, "a {\n    b {\n        c:1;\n    }\n\n}\n\n");
    }

    #[test]
    fn test_url_semicolon_stays_inline() {
        let out = format_css("a{background:url(data:image/png;base64,AAA==);}", 4);
        assert_eq!(
            out,
            "a {\n    background:url(data:image/png;base64,AAA==);\n}\n\n"
        );
    }

    #[test]
    fn test_media_block() {
        let out = format_css("@media screen{a{color:red;}}", 4);
        assert_eq!(
            out,
            "@media screen {\n    a {\n        color:red;\n    }\n\n}\n\n"
        );
    }

    #[test]
    fn test_font_face_header_not_indented_when_nested() {
        // The @-prefix exemption is visible when an exempt at-rule sits
        // inside another block: its header lands at column 0 while its
        // body still gets depth-based indentation.
        let out = format_css("@media print{@font-face{font-family:x;src:url(a);}}", 4);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "@media print {");
        assert_eq!(lines[1], "@font-face {");
        assert_eq!(lines[2], "        font-family:x;");
        assert_eq!(lines[3], "        src:url(a);");
    }

    #[test]
    fn test_selector_list_split() {
        let out = format_css("h1,h2{margin:0;}", 4);
        assert_eq!(out, "h1,\nh2 {\n    margin:0;\n}\n\n");
    }

    #[test]
    fn test_rgba_arguments_stay_inline() {
        let out = format_css("a{color:rgba(0,0,0,.5);}", 4);
        assert_eq!(out, "a {\n    color:rgba(0,0,0,.5);\n}\n\n");
    }

    #[test]
    fn test_two_space_indent() {
        let out = format_css("a{b{c:1;}}", 2);
        assert_eq!(out, "a {\n  b {\n    c:1;\n  }\n\n}\n\n");
    }
}
