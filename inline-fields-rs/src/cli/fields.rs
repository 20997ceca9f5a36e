//! Field extraction commands: line, scan, render.

use crate::cli::args::{LineArgs, RenderArgs, ScanArgs};
use crate::cli::output::Output;
use crate::error::{FieldError, Result};
use crate::parser::{parse_inline_value, replace_document_fields, FieldExtractor};
use crate::types::{DocumentField, InlineField, Wrapping};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// A field as reported by the CLI.
#[derive(Debug, Serialize)]
pub struct FieldOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub key: String,
    /// Value as written, trimmed.
    pub raw: String,
    /// Normalized value; absent when the field is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub start: usize,
    pub start_value: usize,
    pub end: usize,
    pub wrapping: Wrapping,
    /// The same span in UTF-16 code units, for JavaScript-style string indexing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utf16: Option<Utf16Span>,
}

/// Field offsets in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Utf16Span {
    pub start: usize,
    pub start_value: usize,
    pub end: usize,
}

impl FieldOutput {
    /// Build the output for `field`, found in `line_text` (which may run past the line's end).
    fn new(field: &InlineField, line_text: &str, line: Option<usize>) -> Self {
        let utf16 = field
            .utf16_span(line_text)
            .map(|(start, start_value, end)| Utf16Span {
                start,
                start_value,
                end,
            });
        Self {
            line,
            key: field.key.clone(),
            raw: field.value.clone(),
            value: parse_inline_value(&field.value).as_str().map(str::to_string),
            start: field.start,
            start_value: field.start_value,
            end: field.end,
            wrapping: field.wrapping,
            utf16,
        }
    }
}

/// Output for the line and scan commands.
#[derive(Debug, Serialize)]
pub struct FieldsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub total: usize,
    pub fields: Vec<FieldOutput>,
}

/// Run the line command.
pub fn line(extractor: &FieldExtractor, args: &LineArgs, output: &Output) -> Result<()> {
    let text = if args.text == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        input.trim_end_matches(['\n', '\r']).to_string()
    } else {
        args.text.clone()
    };

    let fields: Vec<FieldOutput> = extractor
        .extract(&text, args.tasks)
        .iter()
        .map(|f| FieldOutput::new(f, &text, None))
        .collect();

    output.print(&FieldsOutput {
        file: None,
        total: fields.len(),
        fields,
    })
}

/// Run the scan command.
pub fn scan(extractor: &FieldExtractor, args: &ScanArgs, output: &Output) -> Result<()> {
    let content = read_file(&args.file)?;

    let fields: Vec<FieldOutput> = extractor
        .extract_document(&content, args.tasks)
        .iter()
        .filter(|df| args.key.as_ref().is_none_or(|key| &df.field.key == key))
        .map(|df| FieldOutput::new(&df.field, &content[df.line_offset..], Some(df.line)))
        .collect();

    if fields.is_empty() {
        output.info(&format!("No inline fields in {}", args.file.display()));
    }

    output.print(&FieldsOutput {
        file: Some(args.file.display().to_string()),
        total: fields.len(),
        fields,
    })
}

/// Run the render command.
pub fn render(extractor: &FieldExtractor, args: &RenderArgs, output: &Output) -> Result<()> {
    let content = read_file(&args.file)?;
    let fields = extractor.extract_document(&content, args.tasks);
    let rendered = replace_document_fields(&content, &fields, |df| {
        render_field(df, args.template.as_deref())
    });
    output.print_raw(&rendered);
    Ok(())
}

/// Render one field, either through `template` or in the reading-view style
/// (`key: value` for bracket fields, bare value otherwise).
pub fn render_field(df: &DocumentField, template: Option<&str>) -> String {
    let field = &df.field;
    let value = parse_inline_value(&field.value);
    let value = value.as_str().unwrap_or("");

    match template {
        Some(template) => template.replace("{key}", &field.key).replace("{value}", value),
        None if field.wrapping.shows_key() => format!("{}: {}", field.key, value),
        None => value.to_string(),
    }
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FieldError::FileNotFound(path.to_path_buf()));
    }
    log::debug!("Reading {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}
