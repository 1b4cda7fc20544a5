//! Structural splitting: newline insertion at CSS boundaries
//!
//! No parser is involved. Each step is a whole-text substitution, applied
//! in a fixed order; the output of one step is the sole input to the next.

use crate::format::patterns::{
    CLOSE_BRACE_RE, COMMA_SPLIT_RE, FONT_FACE_RE, KEYFRAMES_RE, MEDIA_RE, OPEN_BRACE_RE,
    SEMICOLON_SPLIT_RE, WHITESPACE_RUN_RE,
};

/// Insert newlines at structural boundaries of a CSS text blob.
///
/// Order matters: braces first, then semicolons (with the paren guard),
/// then at-rule header normalization, then selector commas. At-rule
/// headers come after the generic brace pass so `@media x {` is
/// re-normalized to a single `@media <prelude> {` line.
#[must_use]
pub fn split_structure(css: &str) -> String {
    // Normalize minified input: any whitespace run becomes one space
    let text = WHITESPACE_RUN_RE.replace_all(css.trim(), " ");

    // One blank line after every rule block
    let text = CLOSE_BRACE_RE.replace_all(&text, "}\n\n");

    // Newline after every opening brace, one space before it
    let text = OPEN_BRACE_RE.replace_all(&text, " {\n");

    // Newline after semicolons outside parens
    let text = SEMICOLON_SPLIT_RE.replace_all(&text, ";\n");

    // At-rule headers keep prelude and brace on one line
    let text = MEDIA_RE.replace_all(&text, "@media $1 {\n");
    let text = KEYFRAMES_RE.replace_all(&text, "@keyframes $1 {\n");
    let text = FONT_FACE_RE.replace_all(&text, "@font-face {\n");

    // Comma-separated selectors onto separate lines, outside parens
    COMMA_SPLIT_RE.replace_all(&text, ",\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minified_rule() {
        assert_eq!(
            split_structure("a{color:red;background:blue}"),
            "a {\ncolor:red;\nbackground:blue}\n\n"
        );
    }

    #[test]
    fn test_whitespace_normalized_first() {
        assert_eq!(
            split_structure("a \t\n {  color:red; }"),
            "a {\ncolor:red;\n}\n\n"
        );
    }

    #[test]
    fn test_semicolon_inside_url_not_split() {
        let out = split_structure("a{background:url(data:image/png;base64,AAA==);}");
        assert!(out.contains("url(data:image/png;base64,AAA==);\n"));
    }

    #[test]
    fn test_comma_inside_function_not_split() {
        let out = split_structure("a{box-shadow:0 0 1px rgba(0,0,0,.5);}");
        assert!(out.contains("rgba(0,0,0,.5)"));
    }

    #[test]
    fn test_media_header_single_line() {
        let out = split_structure("@media screen and (min-width:700px){a{x:y;}}");
        assert!(out.starts_with("@media screen and (min-width:700px) {\n"));
    }

    #[test]
    fn test_keyframes_header_single_line() {
        let out = split_structure("@keyframes spin{from{transform:none;}}");
        assert!(out.starts_with("@keyframes spin {\n"));
    }

    #[test]
    fn test_selector_commas_split() {
        let out = split_structure("h1,h2,h3{margin:0;}");
        assert!(out.starts_with("h1,\nh2,\nh3 {\n"));
    }

    #[test]
    fn test_already_formatted_input_is_stable() {
        let formatted = "a {\ncolor:red;\n}\n\n";
        assert_eq!(split_structure(formatted), formatted);
    }
}
