//! Syntax configuration: wrapper pairs and emoji task-date fields.

use crate::error::{FieldError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Characters with fixed meaning inside a field: the `::` separator and the escape.
const RESERVED_CHARS: [char; 2] = [':', '\\'];

/// An opener/closer pair that can delimit an inline field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperDef {
    pub open: char,
    pub close: char,
}

/// An emoji shorthand field: a regex whose first capture group is the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFieldDef {
    /// Field key reported for matches (e.g. "due").
    pub key: String,
    /// Regular expression; capture group 1 is the field value.
    pub pattern: String,
}

impl TaskFieldDef {
    fn new(key: &str, pattern: &str) -> Self {
        Self {
            key: key.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// Syntax configuration for field extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxConfig {
    /// Wrapper pairs, scanned in this order.
    #[serde(default = "default_wrappers")]
    pub wrappers: Vec<WrapperDef>,

    /// Emoji task-date fields, matched in this order.
    #[serde(default = "default_task_fields")]
    pub task_fields: Vec<TaskFieldDef>,
}

fn default_wrappers() -> Vec<WrapperDef> {
    vec![
        WrapperDef { open: '[', close: ']' },
        WrapperDef { open: '(', close: ')' },
    ]
}

fn default_task_fields() -> Vec<TaskFieldDef> {
    vec![
        TaskFieldDef::new("created", r"\x{2795}\s*([0-9]{4}-[0-9]{2}-[0-9]{2})"),
        TaskFieldDef::new("start", r"\x{1F6EB}\s*([0-9]{4}-[0-9]{2}-[0-9]{2})"),
        TaskFieldDef::new(
            "scheduled",
            r"[\x{23F3}\x{231B}]\s*([0-9]{4}-[0-9]{2}-[0-9]{2})",
        ),
        TaskFieldDef::new(
            "due",
            r"(?:\x{1F4C5}|\x{1F4C6}|\x{1F5D3}\x{FE0F}?)\s*([0-9]{4}-[0-9]{2}-[0-9]{2})",
        ),
        TaskFieldDef::new("completion", r"\x{2705}\s*([0-9]{4}-[0-9]{2}-[0-9]{2})"),
    ]
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            wrappers: default_wrappers(),
            task_fields: default_task_fields(),
        }
    }
}

impl SyntaxConfig {
    /// Path of the user-level config file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inline-fields").join("config.toml"))
    }

    /// Load and validate a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FieldError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded syntax config from {}", path.display());
        Ok(config)
    }

    /// Load the user-level config, falling back to the defaults if it is absent.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                log::debug!("No user syntax config found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SyntaxConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the config for wrappers and patterns the extractor cannot use.
    pub fn validate(&self) -> Result<()> {
        for (i, wrapper) in self.wrappers.iter().enumerate() {
            if let Some(reserved) = [wrapper.open, wrapper.close]
                .into_iter()
                .find(|c| RESERVED_CHARS.contains(c))
            {
                return Err(FieldError::InvalidConfig(format!(
                    "wrapper '{}{}' uses reserved character '{}'",
                    wrapper.open, wrapper.close, reserved
                )));
            }
            if wrapper.open == wrapper.close {
                return Err(FieldError::InvalidConfig(format!(
                    "wrapper '{}' uses the same character to open and close",
                    wrapper.open
                )));
            }
            for other in &self.wrappers[i + 1..] {
                let clash = [other.open, other.close]
                    .iter()
                    .any(|c| *c == wrapper.open || *c == wrapper.close);
                if clash {
                    return Err(FieldError::InvalidConfig(format!(
                        "wrappers '{}{}' and '{}{}' share a character",
                        wrapper.open, wrapper.close, other.open, other.close
                    )));
                }
            }
        }

        for field in &self.task_fields {
            if field.key.trim().is_empty() {
                return Err(FieldError::InvalidConfig(
                    "task field with empty key".to_string(),
                ));
            }
            let regex = regex::Regex::new(&field.pattern)?;
            if regex.captures_len() < 2 {
                return Err(FieldError::InvalidConfig(format!(
                    "task field '{}' pattern has no capture group",
                    field.key
                )));
            }
        }

        Ok(())
    }

    /// Every opener and closer character; none of these may appear in a key.
    pub fn delimiter_chars(&self) -> Vec<char> {
        self.wrappers
            .iter()
            .flat_map(|w| [w.open, w.close])
            .collect()
    }
}
