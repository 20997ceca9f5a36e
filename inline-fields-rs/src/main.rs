//! inline-fields CLI entry point.

use clap::Parser;
use inline_fields::cli::args::{Cli, Commands};
use inline_fields::cli::fields;
use inline_fields::cli::output::Output;
use inline_fields::config::SyntaxConfig;
use inline_fields::error::FieldError;
use inline_fields::parser::FieldExtractor;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG overrides the -v level.
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), FieldError> {
    let config = match &cli.config {
        Some(path) => SyntaxConfig::load(path)?,
        None => SyntaxConfig::load_default()?,
    };
    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Line(args) => fields::line(&FieldExtractor::new(&config)?, args, &output),
        Commands::Scan(args) => fields::scan(&FieldExtractor::new(&config)?, args, &output),
        Commands::Render(args) => fields::render(&FieldExtractor::new(&config)?, args, &output),
        Commands::Config => output.print(&config),
    }
}
