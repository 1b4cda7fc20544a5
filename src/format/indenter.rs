//! Brace-depth indentation
//!
//! A single left-to-right pass over structurally split lines. Depth is
//! the count of open `{` blocks; closing braces pull their own line back
//! one level before indenting.

/// Decide whether a (trimmed) line receives computed indentation.
///
/// At-rule header lines are exempt, except `@media` and `@keyframes`
/// which are indented like ordinary selectors. `@font-face` and any
/// other at-rule stay at column 0 even when nested. The asymmetry is
/// inherited behavior and is preserved on purpose.
fn receives_indent(line: &str) -> bool {
    !line.starts_with('@') || line.starts_with("@media") || line.starts_with("@keyframes")
}

/// Assign leading whitespace to every line based on brace nesting depth.
///
/// Empty lines pass through unindented. Depth is floored at zero, so
/// unbalanced closers cannot underflow.
#[must_use]
pub fn apply_indentation(text: &str, indent_size: usize) -> String {
    let mut formatted_lines: Vec<String> = Vec::new();
    let mut depth: usize = 0;

    for raw_line in text.split('\n') {
        let line = raw_line.trim();

        if line.is_empty() {
            formatted_lines.push(String::new());
            continue;
        }

        // Closing brace drops this line back a level
        if line.starts_with('}') {
            depth = depth.saturating_sub(1);
        }

        if receives_indent(line) {
            let mut indented = " ".repeat(depth * indent_size);
            indented.push_str(line);
            formatted_lines.push(indented);
        } else {
            formatted_lines.push(line.to_string());
        }

        // Opening brace indents everything after this line
        if line.ends_with('{') {
            depth += 1;
        }
    }

    formatted_lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_rule() {
        let out = apply_indentation("a {\ncolor:red;\n}", 4);
        assert_eq!(out, "a {\n    color:red;\n}");
    }

    #[test]
    fn test_nested_depths() {
        let out = apply_indentation("a {\nb {\nc:1;\n}\n}", 4);
        assert_eq!(out, "a {\n    b {\n        c:1;\n    }\n}");
    }

    #[test]
    fn test_empty_lines_pass_through() {
        let out = apply_indentation("a {\nx:1;\n}\n\nb {\ny:2;\n}", 4);
        assert_eq!(out, "a {\n    x:1;\n}\n\nb {\n    y:2;\n}");
    }

    #[test]
    fn test_depth_floors_at_zero() {
        let out = apply_indentation("}\n}\na {\nx:1;\n}", 4);
        assert_eq!(out, "}\n}\na {\n    x:1;\n}");
    }

    #[test]
    fn test_media_header_is_indented() {
        let out = apply_indentation("a {\n@media screen {\nb {\nx:1;\n}\n}\n}", 4);
        assert_eq!(
            out,
            "a {\n    @media screen {\n        b {\n            x:1;\n        }\n    }\n}"
        );
    }

    #[test]
    fn test_other_at_rules_stay_at_column_zero() {
        let out = apply_indentation("@media x {\n@font-face {\nsrc:url(a);\n}\n}", 4);
        assert_eq!(out, "@media x {\n@font-face {\n        src:url(a);\n    }\n}");
    }

    #[test]
    fn test_keyframes_is_indented() {
        let out = apply_indentation("@supports x {\n@keyframes k {\nfrom {\no:0;\n}\n}\n}", 4);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "@supports x {");
        assert_eq!(lines[1], "    @keyframes k {");
    }

    #[test]
    fn test_existing_indentation_is_replaced() {
        let out = apply_indentation("a {\n        color:red;\n}", 4);
        assert_eq!(out, "a {\n    color:red;\n}");
    }
}
