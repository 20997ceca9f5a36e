//! Normalization of raw inline field values.

use crate::types::Literal;

/// Parse a raw inline field value.
///
/// Empty or whitespace-only values become [`Literal::Null`] so that "no value"
/// looks the same regardless of where it came from. Everything else is kept
/// as the original string; richer typing (numbers, dates, links) would slot in
/// here without changing the extractor.
pub fn parse_inline_value(value: &str) -> Literal {
    if value.trim().is_empty() {
        Literal::Null
    } else {
        Literal::String(value.to_string())
    }
}
