//! Inline field extraction (`[key:: value]`, `(key:: value)` and emoji dates).
//!
//! Parsing is deliberately forgiving so that bad nesting or stray Markdown
//! never aborts a line:
//!
//! - Every wrapper opener in the line is tried as the start of a `key::`.
//! - If that works, the value runs until the matching closer, honoring
//!   nesting and backslash escapes.
//! - Candidates that fail any step are skipped and scanning moves on.
//!
//! The resulting fields are sorted by start offset and overlapping fields are
//! dropped, earliest first.

use crate::config::{SyntaxConfig, WrapperDef};
use crate::error::Result;
use crate::parser::bracket::find_closing;
use crate::parser::task_field::{extract_task_fields, TaskFieldPattern};
use crate::types::{InlineField, Wrapping};
use std::sync::LazyLock;

const SEPARATOR: &str = "::";

static DEFAULT_EXTRACTOR: LazyLock<FieldExtractor> =
    LazyLock::new(|| FieldExtractor::new(&SyntaxConfig::default()).unwrap());

/// Extract inline fields from a line using the default syntax.
///
/// When `include_task_fields` is set, emoji shorthand dates are extracted too.
pub fn extract_inline_fields(line: &str, include_task_fields: bool) -> Vec<InlineField> {
    DEFAULT_EXTRACTOR.extract(line, include_task_fields)
}

/// Field extractor compiled from a [`SyntaxConfig`].
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    wrappers: Vec<WrapperDef>,
    forbidden_key_chars: Vec<char>,
    task_patterns: Vec<TaskFieldPattern>,
}

impl FieldExtractor {
    /// Validate `config` and compile its task patterns.
    pub fn new(config: &SyntaxConfig) -> Result<Self> {
        config.validate()?;
        let task_patterns = config
            .task_fields
            .iter()
            .map(TaskFieldPattern::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            wrappers: config.wrappers.clone(),
            forbidden_key_chars: config.delimiter_chars(),
            task_patterns,
        })
    }

    /// The extractor shared by [`extract_inline_fields`].
    pub fn default_ref() -> &'static FieldExtractor {
        &DEFAULT_EXTRACTOR
    }

    /// Extract all non-overlapping fields from `line`, ordered by start offset.
    pub fn extract(&self, line: &str, include_task_fields: bool) -> Vec<InlineField> {
        let mut fields = Vec::new();

        for wrapper in &self.wrappers {
            let mut found = find_char_from(line, wrapper.open, 0);
            while let Some(index) = found {
                match self.parse_field_at(line, index, wrapper) {
                    Some(field) => {
                        found = find_char_from(line, wrapper.open, field.end);
                        fields.push(field);
                    }
                    None => {
                        log::trace!("No inline field at offset {}", index);
                        found = find_char_from(line, wrapper.open, index + wrapper.open.len_utf8());
                    }
                }
            }
        }

        if include_task_fields {
            fields.extend(extract_task_fields(line, &self.task_patterns));
        }

        // Stable: at equal starts, wrapped fields stay ahead of emoji fields.
        fields.sort_by_key(|f| f.start);

        let mut kept: Vec<InlineField> = Vec::with_capacity(fields.len());
        for field in fields {
            match kept.last() {
                Some(last) if field.overlaps(last.start, last.end) => {
                    log::debug!(
                        "Dropping overlapping field '{}' at {}..{}",
                        field.key,
                        field.start,
                        field.end
                    );
                }
                _ => {
                    log::debug!("Inline field '{}' at {}..{}", field.key, field.start, field.end);
                    kept.push(field);
                }
            }
        }

        kept
    }

    /// Try to parse a complete field whose opener sits at `start`.
    fn parse_field_at(&self, line: &str, start: usize, wrapper: &WrapperDef) -> Option<InlineField> {
        let key_start = start + wrapper.open.len_utf8();
        let separator = key_start + line.get(key_start..)?.find(SEPARATOR)?;
        let key = line[key_start..separator].trim();

        if key.contains(self.forbidden_key_chars.as_slice()) {
            return None;
        }

        let value_start = separator + SEPARATOR.len();
        let closing = find_closing(line, value_start, wrapper.open, wrapper.close)?;

        Some(InlineField {
            key: key.to_string(),
            value: closing.value,
            start,
            start_value: value_start,
            end: closing.end,
            wrapping: Wrapping::Wrapper(wrapper.open),
        })
    }
}

/// Byte offset of the first `c` at or after `from`.
fn find_char_from(line: &str, c: char, from: usize) -> Option<usize> {
    line.get(from..)?.find(c).map(|i| from + i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaskFieldDef;
    use pretty_assertions::assert_eq;

    fn keys_values(fields: &[InlineField]) -> Vec<(&str, &str)> {
        fields
            .iter()
            .map(|f| (f.key.as_str(), f.value.as_str()))
            .collect()
    }

    #[test]
    fn test_bracket_field() {
        let fields = extract_inline_fields("[a:: b]", false);
        assert_eq!(
            fields,
            vec![InlineField {
                key: "a".to_string(),
                value: "b".to_string(),
                start: 0,
                start_value: 4,
                end: 7,
                wrapping: Wrapping::Wrapper('['),
            }]
        );
    }

    #[test]
    fn test_paren_field() {
        let fields = extract_inline_fields("(x:: y)", false);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, "x");
        assert_eq!(fields[0].value, "y");
        assert_eq!(fields[0].wrapping, Wrapping::Wrapper('('));
    }

    #[test]
    fn test_field_within_text() {
        let line = "Some text [status:: active] here.";
        let fields = extract_inline_fields(line, false);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].source(line), Some("[status:: active]"));
        assert_eq!(&line[fields[0].start_value..fields[0].end - 1], " active");
    }

    #[test]
    fn test_nested_value() {
        let fields = extract_inline_fields("[a:: [nested] nope]", false);
        assert_eq!(keys_values(&fields), vec![("a", "[nested] nope")]);
        assert_eq!(fields[0].end, 19);
    }

    #[test]
    fn test_wikilink_value() {
        let fields = extract_inline_fields("[parent:: [[Other Note]]]", false);
        assert_eq!(keys_values(&fields), vec![("parent", "[[Other Note]]")]);
    }

    #[test]
    fn test_escaped_closer() {
        let line = r"[a:: b\] c]";
        let fields = extract_inline_fields(line, false);
        assert_eq!(keys_values(&fields), vec![("a", r"b\] c")]);
        assert_eq!(fields[0].end, line.len());
    }

    #[test]
    fn test_no_separator() {
        assert!(extract_inline_fields("[just text]", false).is_empty());
    }

    #[test]
    fn test_forbidden_key_chars() {
        // The outer candidate is rejected; scanning resumes one character later.
        let fields = extract_inline_fields("[a[b:: c]", false);
        assert!(fields.iter().all(|f| f.start != 0));
        assert_eq!(keys_values(&fields), vec![("b", "c")]);
        assert_eq!(fields[0].start, 2);

        assert!(extract_inline_fields("[a)b:: c]", false).is_empty());
    }

    #[test]
    fn test_inner_candidate_after_rejected_outer() {
        // The outer '[' has a bracket in its key; the inner one parses.
        let fields = extract_inline_fields("[x [a:: b]", false);
        assert_eq!(keys_values(&fields), vec![("a", "b")]);
        assert_eq!(fields[0].start, 3);
    }

    #[test]
    fn test_unclosed_field() {
        assert!(extract_inline_fields("[a:: b", false).is_empty());
        assert!(extract_inline_fields("[a:: [b]", false).is_empty());
    }

    #[test]
    fn test_multiple_fields() {
        let fields = extract_inline_fields("[a:: 1] text (b:: 2)", false);
        assert_eq!(keys_values(&fields), vec![("a", "1"), ("b", "2")]);
        assert!(fields[0].end <= fields[1].start);
        assert_eq!(fields[1].wrapping, Wrapping::Wrapper('('));
    }

    #[test]
    fn test_sorted_across_wrapper_kinds() {
        let fields = extract_inline_fields("(b:: 2) then [a:: 1]", false);
        assert_eq!(keys_values(&fields), vec![("b", "2"), ("a", "1")]);
    }

    #[test]
    fn test_adjacent_fields_both_kept() {
        let fields = extract_inline_fields("[a:: 1][b:: 2]", false);
        assert_eq!(keys_values(&fields), vec![("a", "1"), ("b", "2")]);
        assert_eq!(fields[0].end, fields[1].start);
    }

    #[test]
    fn test_paren_inside_bracket_dropped() {
        // The paren field is found independently but overlaps the bracket field.
        let fields = extract_inline_fields("[a:: (b:: c)]", false);
        assert_eq!(keys_values(&fields), vec![("a", "(b:: c)")]);
    }

    #[test]
    fn test_bracket_inside_paren_dropped() {
        let fields = extract_inline_fields("(a:: [b:: c])", false);
        assert_eq!(keys_values(&fields), vec![("a", "[b:: c]")]);
        assert_eq!(fields[0].wrapping, Wrapping::Wrapper('('));
    }

    #[test]
    fn test_matched_field_not_rescanned() {
        // The nested '[' lies inside the outer field and is never tried.
        let fields = extract_inline_fields("[a:: [b:: c]]", false);
        assert_eq!(keys_values(&fields), vec![("a", "[b:: c]")]);
    }

    #[test]
    fn test_keys_and_values_trimmed() {
        let fields = extract_inline_fields("[  my key  ::   spaced value   ]", false);
        assert_eq!(keys_values(&fields), vec![("my key", "spaced value")]);
    }

    #[test]
    fn test_empty_key_and_value() {
        let fields = extract_inline_fields("[::]", false);
        assert_eq!(keys_values(&fields), vec![("", "")]);
        assert_eq!(fields[0].start_value, 3);
        assert_eq!(fields[0].end, 4);
    }

    #[test]
    fn test_separator_found_past_closer() {
        // The first "::" is in a later field; the key then spans a ']' and is rejected.
        let fields = extract_inline_fields("[nope] [a:: b]", false);
        assert_eq!(keys_values(&fields), vec![("a", "b")]);
    }

    #[test]
    fn test_unwrapped_key_not_matched() {
        assert!(extract_inline_fields("status:: active", false).is_empty());
    }

    #[test]
    fn test_emoji_ignored_without_task_flag() {
        assert!(extract_inline_fields("Task 📅 2024-01-15", false).is_empty());
    }

    #[test]
    fn test_emoji_due_field() {
        let line = "- [ ] Task 📅 2024-01-15";
        let fields = extract_inline_fields(line, true);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, "due");
        assert_eq!(fields[0].value, "2024-01-15");
        assert_eq!(fields[0].wrapping, Wrapping::EmojiShorthand);
        assert_eq!(fields[0].end, line.len());
    }

    #[test]
    fn test_emoji_inside_bracket_field_dropped() {
        let line = "[due:: 📅 2024-01-15]";
        let fields = extract_inline_fields(line, true);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].wrapping, Wrapping::Wrapper('['));
        assert_eq!(fields[0].value, "📅 2024-01-15");
    }

    #[test]
    fn test_bracket_wins_tie_with_emoji() {
        // A custom emoji pattern that starts at the same offset as a bracket field.
        let mut config = SyntaxConfig::default();
        config.task_fields = vec![TaskFieldDef {
            key: "tag".to_string(),
            pattern: r"\[(\w+)".to_string(),
        }];
        let extractor = FieldExtractor::new(&config).unwrap();
        let fields = extractor.extract("[a:: b]", true);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].wrapping, Wrapping::Wrapper('['));
    }

    #[test]
    fn test_emoji_and_bracket_fields_together() {
        let line = "[priority:: high] ⏳ 2024-02-01 ✅ 2024-02-03";
        let fields = extract_inline_fields(line, true);
        assert_eq!(
            keys_values(&fields),
            vec![
                ("priority", "high"),
                ("scheduled", "2024-02-01"),
                ("completion", "2024-02-03"),
            ]
        );
    }

    #[test]
    fn test_custom_wrappers() {
        let config = SyntaxConfig {
            wrappers: vec![WrapperDef { open: '{', close: '}' }],
            task_fields: Vec::new(),
        };
        let extractor = FieldExtractor::new(&config).unwrap();
        let fields = extractor.extract("{a:: {b}} [c:: d]", false);
        assert_eq!(keys_values(&fields), vec![("a", "{b}")]);
        assert_eq!(fields[0].wrapping, Wrapping::Wrapper('{'));
    }

    #[test]
    fn test_multibyte_offsets() {
        let line = "café [clé:: valeur]";
        let fields = extract_inline_fields(line, false);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].start, 6);
        assert_eq!(fields[0].source(line), Some("[clé:: valeur]"));
        assert_eq!(fields[0].utf16_span(line), Some((5, 5 + 6, 5 + 14)));
    }

    #[test]
    fn test_empty_line() {
        assert!(extract_inline_fields("", true).is_empty());
    }

    #[test]
    fn test_default_ref_matches_free_function() {
        let line = "[a:: 1] (b:: 2)";
        assert_eq!(
            FieldExtractor::default_ref().extract(line, false),
            extract_inline_fields(line, false)
        );
    }
}
