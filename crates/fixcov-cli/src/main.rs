//! fixcov CLI
//!
//! Command-line interface for fixture schema coverage

use clap::{Parser, Subcommand};
use fixcov_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "fixcov")]
#[command(
    about = "fixcov - Schema coverage of recorded API response fixtures",
    long_about = None
)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Measure how much of the response schema the fixtures exercise
    Coverage(commands::coverage::CoverageArgs),
    /// Compare two saved coverage reports
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Coverage(args) => commands::coverage::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
