//! Diff command
//!
//! Usage: fixcov diff <OLD> <NEW> [-n] [-a] [--lenient]

use clap::Args;
use fixcov_core::diff::{diff_reports, render_diff, DiffRenderOptions, ShapeMode};
use fixcov_store::report_io::read_report;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Earlier coverage report (JSON, or YAML for .yaml/.yml)
    #[arg(value_name = "OLD")]
    pub old: PathBuf,

    /// Later coverage report
    #[arg(value_name = "NEW")]
    pub new: PathBuf,

    /// Disable color in output
    #[arg(short, long)]
    pub no_color: bool,

    /// Output all fields, not just the ones with changes
    #[arg(short, long)]
    pub all_fields: bool,

    /// Accept reports with different fields; a missing field counts as zero
    #[arg(long)]
    pub lenient: bool,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let old = read_report(&args.old)?;
    let new = read_report(&args.new)?;

    let mode = if args.lenient {
        ShapeMode::Lenient
    } else {
        ShapeMode::Strict
    };
    let diff = diff_reports(&old, &new, mode)?;

    let options = DiffRenderOptions {
        all_fields: args.all_fields,
        color: !args.no_color,
    };
    print!("{}", render_diff(&diff, &options));
    Ok(())
}
