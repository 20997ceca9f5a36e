//! Parsers for inline fields in Obsidian markdown.

pub mod bracket;
pub mod code_block;
pub mod document;
pub mod inline_field;
pub mod task_field;
pub mod value;

pub use bracket::{find_closing, ClosingMatch};
pub use code_block::{find_code_block_ranges, source_lines, CodeBlockRange, SourceLine};
pub use document::{
    collect_fields, extract_document_fields, replace_document_fields, replace_inline_fields,
};
pub use inline_field::{extract_inline_fields, FieldExtractor};
pub use task_field::{extract_task_fields, TaskFieldPattern};
pub use value::parse_inline_value;
