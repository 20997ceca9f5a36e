//! Error types and exit codes for inline-fields.
//!
//! Field extraction itself never fails; these errors come from loading
//! syntax configuration and from the CLI's file handling.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const GENERAL_ERROR: i32 = 1;
    pub const FILE_NOT_FOUND: i32 = 2;
    pub const INVALID_CONFIG: i32 = 3;
}

/// Main error type for inline-fields operations.
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid syntax config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl FieldError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FieldError::FileNotFound(_) => exit_code::FILE_NOT_FOUND,
            FieldError::InvalidConfig(_) | FieldError::TomlParse(_) | FieldError::Regex(_) => {
                exit_code::INVALID_CONFIG
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for inline-fields operations.
pub type Result<T> = std::result::Result<T, FieldError>;
