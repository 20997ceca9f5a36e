//! Matching closers for wrapped field values.

/// The value enclosed by a wrapper and the offset just past its closer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosingMatch {
    /// Enclosed text, trimmed.
    pub value: String,
    /// Byte offset just past the matching closer.
    pub end: usize,
}

/// Find the closer matching an already-consumed `open`, scanning from `start`.
///
/// Nested `open`/`close` pairs are balanced. A backslash escapes the next
/// character so it can neither open nor close; a second backslash cancels
/// the first instead of being escaped itself, so `\\]` still closes.
///
/// Returns `None` if the line ends before the nesting is closed.
pub fn find_closing(line: &str, start: usize, open: char, close: char) -> Option<ClosingMatch> {
    let rest = line.get(start..)?;
    let mut nesting: i32 = 0;
    let mut escaped = false;

    for (offset, c) in rest.char_indices() {
        if c == '\\' {
            escaped = !escaped;
            continue;
        }

        if escaped {
            escaped = false;
            continue;
        }

        if c == open {
            nesting += 1;
        } else if c == close {
            nesting -= 1;
        }

        if nesting < 0 {
            return Some(ClosingMatch {
                value: rest[..offset].trim().to_string(),
                end: start + offset + c.len_utf8(),
            });
        }
    }

    None
}
