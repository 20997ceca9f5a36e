//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inline-fields")]
#[command(author, version, about = "Extract Dataview-style inline fields from markdown", long_about = None)]
pub struct Cli {
    /// Syntax config file (TOML); defaults to the user config if present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract inline fields from a single line of text
    Line(LineArgs),

    /// List inline fields in a markdown file
    Scan(ScanArgs),

    /// Print a markdown file with inline fields replaced by a template
    Render(RenderArgs),

    /// Print the effective syntax configuration
    Config,
}

#[derive(Args, Debug)]
pub struct LineArgs {
    /// Line of text, or "-" to read it from stdin
    pub text: String,

    /// Also extract emoji task dates
    #[arg(long)]
    pub tasks: bool,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Markdown file to scan
    pub file: PathBuf,

    /// Also extract emoji task dates
    #[arg(long)]
    pub tasks: bool,

    /// Only report fields with this key
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Markdown file to render
    pub file: PathBuf,

    /// Replacement template; supports {key} and {value}
    #[arg(long)]
    pub template: Option<String>,

    /// Also replace emoji task dates
    #[arg(long)]
    pub tasks: bool,
}
