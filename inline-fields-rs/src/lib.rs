//! inline-fields - Parse Dataview-style inline fields out of Obsidian notes.
//!
//! # Overview
//!
//! An inline field is a `key:: value` annotation embedded in a line of
//! markdown:
//! - `[key:: value]` - rendered with its key
//! - `(key:: value)` - rendered as the value only
//! - `📅 2024-01-15` and other emoji task dates (opt-in)
//!
//! Values may nest brackets (`[parent:: [[Note]]]`) and escape closers with a
//! backslash. Malformed candidates are skipped; extraction never fails.
//!
//! # Example
//!
//! ```
//! use inline_fields::{extract_inline_fields, parse_inline_value, Literal};
//!
//! let fields = extract_inline_fields("[status:: active] (owner:: sam)", false);
//! assert_eq!(fields.len(), 2);
//! assert_eq!(fields[0].key, "status");
//! assert_eq!(parse_inline_value(&fields[1].value), Literal::String("sam".into()));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod types;

// Re-export main types at crate root
pub use config::SyntaxConfig;
pub use error::{FieldError, Result};
pub use parser::{extract_document_fields, extract_inline_fields, parse_inline_value, FieldExtractor};
pub use types::*;
