//! Document-level field scanning and substitution.

use crate::parser::code_block::{
    find_code_block_ranges, is_in_code_block, is_line_in_fenced_code_block, source_lines,
};
use crate::parser::inline_field::FieldExtractor;
use crate::types::{DocumentField, InlineField};
use std::collections::HashMap;

/// Extract fields from every line of a document using the default syntax.
pub fn extract_document_fields(content: &str, include_task_fields: bool) -> Vec<DocumentField> {
    FieldExtractor::default_ref().extract_document(content, include_task_fields)
}

impl FieldExtractor {
    /// Extract fields from every line of `content`, in document order.
    ///
    /// Lines inside fenced code are skipped, as are fields that start inside
    /// an inline code span.
    pub fn extract_document(&self, content: &str, include_task_fields: bool) -> Vec<DocumentField> {
        let code_ranges = find_code_block_ranges(content);
        let mut result = Vec::new();

        for line in source_lines(content) {
            if is_line_in_fenced_code_block(line.number, &code_ranges) {
                continue;
            }

            for field in self.extract(line.text, include_task_fields) {
                if is_in_code_block(line.offset + field.start, &code_ranges) {
                    log::trace!("Skipping field '{}' in inline code on line {}", field.key, line.number);
                    continue;
                }
                result.push(DocumentField {
                    line: line.number,
                    line_offset: line.offset,
                    field,
                });
            }
        }

        result
    }
}

/// Replace each field span in `line` with the output of `render`.
///
/// `fields` must be sorted and non-overlapping, as returned by the extractor
/// for this same line. Fields whose span does not fit the line are left as-is.
pub fn replace_inline_fields<F>(line: &str, fields: &[InlineField], mut render: F) -> String
where
    F: FnMut(&InlineField) -> String,
{
    let mut result = line.to_string();
    let mut limit = line.len();

    // Right to left, so earlier offsets stay valid.
    for field in fields.iter().rev() {
        if field.end > limit || field.source(line).is_none() {
            continue;
        }
        result.replace_range(field.start..field.end, &render(field));
        limit = field.start;
    }

    result
}

/// Replace each document field span in `content` with the output of `render`.
pub fn replace_document_fields<F>(content: &str, fields: &[DocumentField], mut render: F) -> String
where
    F: FnMut(&DocumentField) -> String,
{
    let mut result = content.to_string();
    let mut limit = content.len();

    for field in fields.iter().rev() {
        let range = field.document_range();
        if range.end > limit || content.get(range.clone()).is_none() {
            continue;
        }
        limit = range.start;
        result.replace_range(range, &render(field));
    }

    result
}

/// Group fields by key, preserving their order within each key.
pub fn collect_fields(fields: &[InlineField]) -> HashMap<String, Vec<&InlineField>> {
    let mut map: HashMap<String, Vec<&InlineField>> = HashMap::new();

    for field in fields {
        map.entry(field.key.clone()).or_default().push(field);
    }

    map
}
