/// Regex patterns for CSS structural splitting
///
/// All patterns are compiled once at startup using `LazyLock`.
///
/// The semicolon and comma splitters need a negative lookahead (skip
/// separators inside an open `(...)` span), which the `regex` crate
/// cannot express, so those two are `fancy_regex` patterns.
use std::sync::LazyLock;

use regex::Regex;

/// Build a regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. This is acceptable because all patterns
/// in this module are compile-time constants that are verified by tests.
/// The panic occurs at first access of the `LazyLock` static.
fn build_re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

/// Build a lookahead-capable regex from a compile-time constant pattern.
fn build_fancy_re(pattern: &str) -> fancy_regex::Regex {
    fancy_regex::Regex::new(pattern)
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

// ===== WHITESPACE NORMALIZATION =====

// Any run of whitespace characters (spaces, tabs, newlines)
pub static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s+"));

// ===== BRACE SPLITTING =====

// Closing brace plus trailing whitespace; becomes "}" + blank line
pub static CLOSE_BRACE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\}\s*"));

// Opening brace plus surrounding whitespace; becomes " {" + newline
pub static OPEN_BRACE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\s*\{\s*"));

// ===== DECLARATION AND SELECTOR SPLITTING =====

// Semicolon splitter. The lookahead skips semicolons inside an open
// paren span, e.g. `url(data:image/png;base64,...)`. Heuristic only:
// nested parentheses are not matched pairwise.
pub static SEMICOLON_SPLIT_RE: LazyLock<fancy_regex::Regex> =
    LazyLock::new(|| build_fancy_re(r";\s*(?![^()]*\))"));

// Comma splitter for selector lists, same paren guard as above so
// multi-argument calls like `rgba(0,0,0,.5)` stay on one line
pub static COMMA_SPLIT_RE: LazyLock<fancy_regex::Regex> =
    LazyLock::new(|| build_fancy_re(r",\s*(?![^()]*\))"));

// ===== AT-RULE HEADERS =====

// `@media <prelude> {` and `@keyframes <prelude> {` headers; the lazy
// prelude capture stops before the whitespace preceding the brace
pub static MEDIA_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"@media\s+([^{]+?)\s*\{\s*"));
pub static KEYFRAMES_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"@keyframes\s+([^{]+?)\s*\{\s*"));
pub static FONT_FACE_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"@font-face\s*\{\s*"));

// ===== CLEANUP =====

// Three or more newlines, possibly separated by other whitespace;
// collapses to a single blank line
pub static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"\n\s*\n\s*\n+"));

// ===== MINIFIED-BLOCK DETECTION =====

// A selector-like prefix, an opening brace, a body with at least two
// `;`/`:` occurrences, and a closing brace, all without an intervening
// rule boundary. Candidate spans still have to pass the density check
// in `format::minified` before being reformatted.
pub static MINIFIED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"[^{\n}]*\{[^}]*[;:][^}]*[;:][^}]*\}"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_run() {
        assert_eq!(WHITESPACE_RUN_RE.replace_all("a  \t\n b", " "), "a b");
    }

    #[test]
    fn test_close_brace() {
        assert_eq!(CLOSE_BRACE_RE.replace_all("a{x}b{y}", "}\n\n"), "a{x}\n\nb{y}\n\n");
    }

    #[test]
    fn test_open_brace_consumes_existing_space() {
        // No double space when the input already reads "a {"
        assert_eq!(OPEN_BRACE_RE.replace_all("a {x", " {\n"), "a {\nx");
        assert_eq!(OPEN_BRACE_RE.replace_all("a{x", " {\n"), "a {\nx");
    }

    #[test]
    fn test_semicolon_guard() {
        // Plain semicolon splits
        assert!(SEMICOLON_SPLIT_RE.is_match("color:red;background:blue").unwrap());
        // Semicolon inside url() does not
        let text = "url(data:image/png;base64,AAA==)";
        let replaced = SEMICOLON_SPLIT_RE.replace_all(text, ";\n");
        assert_eq!(replaced, text);
    }

    #[test]
    fn test_comma_guard() {
        let text = "rgba(0,0,0,.5)";
        assert_eq!(COMMA_SPLIT_RE.replace_all(text, ",\n"), text);
        assert_eq!(COMMA_SPLIT_RE.replace_all("a, b", ",\n"), "a,\nb");
    }

    #[test]
    fn test_media_prelude_capture() {
        let caps = MEDIA_RE.captures("@media screen and (max-width: 100px) {").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "screen and (max-width: 100px)");
    }

    #[test]
    fn test_keyframes_prelude_capture() {
        let caps = KEYFRAMES_RE.captures("@keyframes spin {").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "spin");
    }

    #[test]
    fn test_font_face_header() {
        assert!(FONT_FACE_RE.is_match("@font-face {"));
        assert!(FONT_FACE_RE.is_match("@font-face{"));
    }

    #[test]
    fn test_blank_run() {
        assert_eq!(BLANK_RUN_RE.replace_all("a\n\n\n\nb", "\n\n"), "a\n\nb");
        assert_eq!(BLANK_RUN_RE.replace_all("a\n  \n \nb", "\n\n"), "a\n\nb");
        // A single blank line is left alone
        assert_eq!(BLANK_RUN_RE.replace_all("a\n\nb", "\n\n"), "a\n\nb");
    }

    #[test]
    fn test_minified_block_detection() {
        assert!(MINIFIED_BLOCK_RE.is_match("a{color:red;background:blue}"));
        assert!(MINIFIED_BLOCK_RE.is_match(".cls{margin:0;padding:0;}"));
        // A single declaration has only one `:` and no `;`
        assert!(!MINIFIED_BLOCK_RE.is_match("a{color:red}"));
    }
}
