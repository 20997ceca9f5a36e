//! Emoji shorthand task dates (`📅 2024-01-15` and friends).

use crate::config::TaskFieldDef;
use crate::error::Result;
use crate::types::{InlineField, Wrapping};
use regex::Regex;

/// A compiled emoji shorthand pattern.
#[derive(Debug, Clone)]
pub struct TaskFieldPattern {
    pub key: String,
    regex: Regex,
}

impl TaskFieldPattern {
    pub fn compile(def: &TaskFieldDef) -> Result<Self> {
        Ok(Self {
            key: def.key.clone(),
            regex: Regex::new(&def.pattern)?,
        })
    }

    /// First match of this pattern in `line`, as an inline field.
    pub fn find(&self, line: &str) -> Option<InlineField> {
        let caps = self.regex.captures(line)?;
        let full = caps.get(0)?;
        let value = caps.get(1)?;

        // Value starts one character past the marker's first code point.
        let marker_len = full.as_str().chars().next()?.len_utf8();

        Some(InlineField {
            key: self.key.clone(),
            value: value.as_str().to_string(),
            start: full.start(),
            start_value: full.start() + marker_len,
            end: full.end(),
            wrapping: Wrapping::EmojiShorthand,
        })
    }
}

/// Run every pattern once against the whole line, in pattern order.
pub fn extract_task_fields(line: &str, patterns: &[TaskFieldPattern]) -> Vec<InlineField> {
    patterns.iter().filter_map(|p| p.find(line)).collect()
}
