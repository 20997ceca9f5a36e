//! CLI command implementations.

pub mod args;
pub mod output;

pub mod fields;

pub use args::{Cli, Commands};
pub use output::Output;
