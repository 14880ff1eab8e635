//! Line classification: section headers and option lines.
//!
//! Operates on a line's effective content (comment removed, trimmed).
//! Names come back case-folded.

use regex::Regex;
use std::sync::LazyLock;

/// `[name]`, with any whitespace inside the brackets. Anything after the
/// closing bracket is ignored.
static RE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\s*(?P<header>[^\]]*?)\s*\]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// `[name]`
    Header(String),
    /// `[]` or `[   ]`
    EmptyHeader,
    /// `name = value`, `name: value` or a lone `name` (value `None`).
    Option { name: String, value: Option<&'a str> },
    /// A delimiter with nothing in front of it, e.g. `=== broken ===`.
    Malformed,
}

/// Classify non-blank effective content.
pub(crate) fn classify<'a>(content: &'a str, delimiters: &[char]) -> LineKind<'a> {
    if let Some(caps) = RE_HEADER.captures(content) {
        let name = &caps["header"];
        if name.is_empty() {
            return LineKind::EmptyHeader;
        }
        return LineKind::Header(fold(name));
    }

    match content.char_indices().find(|(_, c)| delimiters.contains(c)) {
        Some((idx, delim)) => {
            let name = content[..idx].trim();
            if name.is_empty() {
                return LineKind::Malformed;
            }
            LineKind::Option {
                name: fold(name),
                value: Some(content[idx + delim.len_utf8()..].trim()),
            }
        }
        None => LineKind::Option {
            name: fold(content),
            value: None,
        },
    }
}

/// Trim and lowercase a section or option name.
pub(crate) fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Column of the first non-whitespace character.
pub(crate) fn indentation(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
