//! Shared types for inline-fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag used for fields produced by an emoji task-date marker.
pub const EMOJI_SHORTHAND: &str = "emoji-shorthand";

/// How an inline field was delimited in the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Wrapping {
    /// Wrapped in an opener/closer pair; holds the opener (`[` or `(` by default).
    Wrapper(char),
    /// Implied by an emoji marker followed by a date.
    EmojiShorthand,
}

impl Wrapping {
    /// Whether the field was written in square brackets, which display their key.
    pub fn shows_key(&self) -> bool {
        matches!(self, Wrapping::Wrapper('['))
    }
}

impl fmt::Display for Wrapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wrapping::Wrapper(open) => write!(f, "{}", open),
            Wrapping::EmojiShorthand => f.write_str(EMOJI_SHORTHAND),
        }
    }
}

impl From<Wrapping> for String {
    fn from(wrapping: Wrapping) -> Self {
        wrapping.to_string()
    }
}

impl TryFrom<String> for Wrapping {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == EMOJI_SHORTHAND {
            return Ok(Wrapping::EmojiShorthand);
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(open), None) => Ok(Wrapping::Wrapper(open)),
            _ => Err(format!("invalid wrapping: {:?}", value)),
        }
    }
}

/// A `key:: value` annotation found in a single line of text.
///
/// Offsets are byte offsets into the line the field was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineField {
    /// Trimmed text between the opener and the `::` separator.
    pub key: String,

    /// Trimmed text between `::` and the matching closer (or the emoji's date).
    pub value: String,

    /// Offset of the field's opening character.
    pub start: usize,

    /// Offset where the value portion begins.
    pub start_value: usize,

    /// Offset just past the field's closing character.
    pub end: usize,

    /// Delimiter style that produced this field.
    pub wrapping: Wrapping,
}

impl InlineField {
    /// The raw source text of the field, including its delimiters.
    pub fn source<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.get(self.start..self.end)
    }

    /// Whether this field's span overlaps `[from, to)`.
    pub fn overlaps(&self, from: usize, to: usize) -> bool {
        self.start < to && from < self.end
    }

    /// Convert `(start, start_value, end)` into UTF-16 code-unit offsets.
    ///
    /// Returns `None` if the field does not belong to `line`.
    pub fn utf16_span(&self, line: &str) -> Option<(usize, usize, usize)> {
        Some((
            utf16_offset(line, self.start)?,
            utf16_offset(line, self.start_value)?,
            utf16_offset(line, self.end)?,
        ))
    }
}

/// Convert a byte offset in `line` into a UTF-16 code-unit offset.
///
/// Returns `None` when the offset is out of range or not on a char boundary.
pub fn utf16_offset(line: &str, byte_offset: usize) -> Option<usize> {
    line.get(..byte_offset).map(|prefix| prefix.encode_utf16().count())
}

/// Typed value of an inline field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// No value. Serializes as `null`.
    Null,
    String(String),
}

impl Literal {
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Null => None,
            Literal::String(s) => Some(s),
        }
    }
}

/// An inline field located within a multi-line document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentField {
    /// Line number (1-indexed).
    pub line: usize,

    /// Byte offset of the start of the line within the document.
    pub line_offset: usize,

    /// The field, with offsets relative to the line.
    #[serde(flatten)]
    pub field: InlineField,
}

impl DocumentField {
    /// Absolute `[start, end)` byte range of the field in the document.
    pub fn document_range(&self) -> std::ops::Range<usize> {
        self.line_offset + self.field.start..self.line_offset + self.field.end
    }
}
