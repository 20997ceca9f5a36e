//! Code block detection, so fields inside code are left alone.

use regex::Regex;
use std::sync::LazyLock;

/// A byte range of a document that is fenced code or an inline code span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line number where the code starts (1-indexed).
    pub start_line: usize,
    /// Line number where the code ends (1-indexed, inclusive).
    pub end_line: usize,
    /// Whether this is a fenced code block (vs inline code).
    pub is_fenced: bool,
}

// Opening fence: up to three spaces, then ``` or ~~~ (or longer)
static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(`{3,}|~{3,})").unwrap()
});

// Inline code with double backticks (may contain single backticks)
static INLINE_CODE_DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"``(?:[^`\n]|`[^`\n])*``").unwrap()
});

// Inline code with single backticks
static INLINE_CODE_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`[^`\n]+`").unwrap()
});

/// A line of a document with its byte offset and 1-indexed number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub offset: usize,
    /// Line text without its `\n` / `\r\n` terminator.
    pub text: &'a str,
}

/// Split `content` into lines, keeping track of where each one starts.
pub fn source_lines(content: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    content
        .split_inclusive('\n')
        .enumerate()
        .map(move |(i, raw)| {
            let line = SourceLine {
                number: i + 1,
                offset,
                text: raw.trim_end_matches('\n').trim_end_matches('\r'),
            };
            offset += raw.len();
            line
        })
}

/// Whether `text` closes a fence opened with `len` copies of `fence`.
fn closes_fence(text: &str, fence: char, len: usize) -> bool {
    let trimmed = text.trim();
    trimmed.chars().count() >= len && trimmed.chars().all(|c| c == fence)
}

/// Find all fenced code blocks and inline code spans in `content`.
///
/// A fence that is never closed runs to the end of the document.
pub fn find_code_block_ranges(content: &str) -> Vec<CodeBlockRange> {
    let mut ranges = Vec::new();

    // (fence char, fence length, start offset, start line)
    let mut open: Option<(char, usize, usize, usize)> = None;
    let mut last_line = 0;

    for line in source_lines(content) {
        last_line = line.number;
        match open {
            Some((fence, len, start, start_line)) => {
                if closes_fence(line.text, fence, len) {
                    ranges.push(CodeBlockRange {
                        start,
                        end: line.offset + line.text.len(),
                        start_line,
                        end_line: line.number,
                        is_fenced: true,
                    });
                    open = None;
                }
            }
            None => {
                if let Some(caps) = FENCE_OPEN.captures(line.text) {
                    let marker = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                    if let Some(fence) = marker.chars().next() {
                        open = Some((fence, marker.len(), line.offset, line.number));
                    }
                }
            }
        }
    }

    if let Some((_, _, start, start_line)) = open {
        ranges.push(CodeBlockRange {
            start,
            end: content.len(),
            start_line,
            end_line: last_line,
            is_fenced: true,
        });
    }

    let fenced_count = ranges.len();
    for regex in [&*INLINE_CODE_DOUBLE, &*INLINE_CODE_SINGLE] {
        for m in regex.find_iter(content) {
            let (start, end) = (m.start(), m.end());
            let overlaps = ranges.iter().any(|r| start < r.end && r.start < end);
            if overlaps {
                continue;
            }
            let line = content[..start].matches('\n').count() + 1;
            ranges.push(CodeBlockRange {
                start,
                end,
                start_line: line,
                end_line: line,
                is_fenced: false,
            });
        }
    }
    log::trace!(
        "Found {} fenced and {} inline code ranges",
        fenced_count,
        ranges.len() - fenced_count
    );

    ranges.sort_by_key(|r| r.start);
    ranges
}

/// Check if a byte offset is inside any code range.
pub fn is_in_code_block(offset: usize, ranges: &[CodeBlockRange]) -> bool {
    ranges.iter().any(|r| offset >= r.start && offset < r.end)
}

/// Check if a line number is inside any fenced code block (fences included).
pub fn is_line_in_fenced_code_block(line: usize, ranges: &[CodeBlockRange]) -> bool {
    ranges
        .iter()
        .any(|r| r.is_fenced && line >= r.start_line && line <= r.end_line)
}
