//! Inline directive parsing for `/* cssprettier: */` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `/* cssprettier: --indent 2 --no-backup */`
//!
//! Directives are read before any formatting runs, so it does not matter
//! that the formatter itself does not preserve comments.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern to match cssprettier directives
static CSSPRETTIER_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*/\*\s*cssprettier:\s*(.*?)\s*\*/").unwrap());

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone)]
pub struct DirectiveOverrides {
    pub indent: Option<usize>,
    pub backup: Option<bool>,
    pub format_embedded: Option<bool>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indent.is_none() && self.backup.is_none() && self.format_embedded.is_none()
    }
}

/// Check if a line contains a cssprettier directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    CSSPRETTIER_DIRECTIVE_RE.is_match(line)
}

/// Parse a cssprettier directive line and return option overrides
///
/// # Returns
/// * `Some(DirectiveOverrides)` if the line is a valid directive
/// * `None` if the line is not a directive or sets nothing
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = CSSPRETTIER_DIRECTIVE_RE.captures(line)?;
    let args_str = caps.get(1)?.as_str();

    // Parse the arguments like CLI args
    parse_directive_args(args_str)
}

/// Parse directive arguments into overrides
fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let tokens: Vec<&str> = args_str.split_whitespace().collect();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        match token {
            "-i" | "--indent" => {
                i += 1;
                if i < tokens.len() {
                    overrides.indent = tokens[i].parse().ok();
                }
            }
            "--no-backup" | "--disable-backup" => {
                overrides.backup = Some(false);
            }
            "--backup" | "--enable-backup" => {
                overrides.backup = Some(true);
            }
            "--no-embedded" | "--disable-embedded" => {
                overrides.format_embedded = Some(false);
            }
            "--embedded" | "--enable-embedded" => {
                overrides.format_embedded = Some(true);
            }
            _ => {
                // Unknown option, skip
            }
        }
        i += 1;
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan input for cssprettier directives and return the first found
///
/// This reads the file looking for `/* cssprettier: */` lines.
/// Only the first directive is used (subsequent ones are ignored).
pub fn find_directive<R: std::io::BufRead>(input: &mut R) -> Option<DirectiveOverrides> {
    let mut buffer = String::new();

    while input.read_line(&mut buffer).ok()? > 0 {
        if is_directive_line(&buffer) {
            return parse_directive(&buffer);
        }
        buffer.clear();
    }

    None
}
