//! Pastemark CLI - markdown clipboard conversion.
//!
//! Provides commands for:
//! - `convert`: Render markdown to a styled HTML document
//! - `score`: Score text for Markdown-ness and report the detect verdict

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, ScoreArgs};
use output::Output;

/// Pastemark - markdown clipboard conversion.
#[derive(Parser)]
#[command(name = "pastemark", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to a styled HTML document on stdout.
    Convert(ConvertArgs),
    /// Score text and report whether it would be treated as markdown.
    Score(ScoreArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Convert(args) => args.verbose,
        Commands::Score(args) => args.verbose,
    };

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN.
    // Logs go to stderr so `convert` output stays pipeable.
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Score(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
