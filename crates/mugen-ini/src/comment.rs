//! Comment stripping.
//!
//! Full-line markers are checked against the trimmed line; inline markers
//! only count at column 0 or right after whitespace, so `a;b` or a path such
//! as `data:common.cns` is left intact while `a ;b` is cut before `;`.

/// A raw line with its comment removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stripped<'a> {
    /// Trimmed text before the comment (the whole trimmed line if none).
    pub content: &'a str,
    /// Whether a comment marker was found on the line.
    pub commented: bool,
}

/// Strip the comment from `line` and trim what remains.
pub(crate) fn strip_comment<'a>(
    line: &'a str,
    full_line: &[char],
    inline: &[char],
) -> Stripped<'a> {
    if line
        .trim()
        .chars()
        .next()
        .is_some_and(|c| full_line.contains(&c))
    {
        return Stripped {
            content: "",
            commented: true,
        };
    }

    match inline_comment_start(line, inline) {
        Some(idx) => Stripped {
            content: line[..idx].trim(),
            commented: true,
        },
        None => Stripped {
            content: line.trim(),
            commented: false,
        },
    }
}

/// Byte offset of the leftmost inline marker at column 0 or after whitespace.
fn inline_comment_start(line: &str, inline: &[char]) -> Option<usize> {
    let mut prev: Option<char> = None;
    for (idx, c) in line.char_indices() {
        if inline.contains(&c) && prev.map_or(true, char::is_whitespace) {
            return Some(idx);
        }
        prev = Some(c);
    }
    None
}
