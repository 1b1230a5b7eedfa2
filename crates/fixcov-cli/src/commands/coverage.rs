//! Coverage command
//!
//! Usage: fixcov coverage [-p] [-j] [-l] [-n] [-i FIELDS] [-s PATTERN...] [-e PATTERN...]

use clap::Args;
use fixcov_core::classify::{
    classify_corpus, default_response_types, ResponseType, DEFAULT_SCHEMA_PREFIX,
};
use fixcov_core::coverage::render::format_percent;
use fixcov_core::coverage::{
    compute_report, render_coverage, CoverageConfig, CoverageRenderOptions, DEFAULT_MAX_DEPTH,
};
use fixcov_store::fixtures::{load_fixtures, FixtureSelection};
use fixcov_store::report_io::{report_to_string, write_report, ReportFormat};
use fixcov_store::schema_source::{SchemaSource, DEFAULT_DISCOVERY_URL};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Print only the total coverage percentage, takes precedence over other output options
    #[arg(short, long)]
    pub percent_only: bool,

    /// Output the coverage data as JSON
    #[arg(short, long)]
    pub json_output: bool,

    /// List the fixture files that cover each field
    #[arg(short, long)]
    pub list_files: bool,

    /// Disable color in output
    #[arg(short, long)]
    pub no_color: bool,

    /// Comma-separated field names to leave out of the coverage calculation
    #[arg(short, long, value_name = "FIELDS", value_delimiter = ',')]
    pub ignore_fields: Vec<String>,

    /// Only evaluate fixtures whose names (without extension) appear in files matching these patterns
    #[arg(short, long, value_name = "PATTERN", num_args = 1..)]
    pub scan_files: Vec<String>,

    /// Skip fixtures matching these patterns, relative to the fixtures directory
    #[arg(short, long, value_name = "PATTERN", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Directory holding the fixture files
    #[arg(long, default_value = "mock-responses/vertexai")]
    pub fixtures_dir: PathBuf,

    /// Read the discovery document from a local file
    #[arg(long, conflicts_with_all = ["schema_url", "schema_cache"])]
    pub schema_file: Option<PathBuf>,

    /// Fetch the discovery document from this URL
    #[arg(long, default_value = DEFAULT_DISCOVERY_URL)]
    pub schema_url: String,

    /// Cache file for the fetched discovery document
    #[arg(long)]
    pub schema_cache: Option<PathBuf>,

    /// Prefix of response type schema names
    #[arg(long, default_value = DEFAULT_SCHEMA_PREFIX)]
    pub schema_prefix: String,

    /// Response types to evaluate, in classification order (default: GenerateContentResponse CountTokensResponse)
    #[arg(long = "response-type", value_name = "NAME")]
    pub response_types: Vec<String>,

    /// Maximum schema nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Also save the report to this file (YAML for .yaml/.yml, JSON otherwise)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CoverageArgs {
    fn schema_source(&self) -> SchemaSource {
        match &self.schema_file {
            Some(path) => SchemaSource::File(path.clone()),
            None => SchemaSource::Url {
                url: self.schema_url.clone(),
                cache: self.schema_cache.clone(),
            },
        }
    }

    fn response_types(&self) -> Vec<ResponseType> {
        if self.response_types.is_empty() {
            return default_response_types(&self.schema_prefix);
        }
        self.response_types
            .iter()
            .map(|name| ResponseType::prefixed(&self.schema_prefix, name))
            .collect()
    }

    fn config(&self) -> CoverageConfig {
        CoverageConfig::default()
            .with_ignored_fields(self.ignore_fields.iter().filter(|f| !f.is_empty()).cloned())
            .with_list_files(self.list_files)
            .with_max_depth(self.max_depth)
    }
}

/// Execute coverage command
pub fn execute(args: CoverageArgs) -> Result<(), Box<dyn std::error::Error>> {
    let schemas = args.schema_source().load()?;
    let response_types = args.response_types();

    let selection = FixtureSelection {
        exclude: args.exclude.clone(),
        scan_files: args.scan_files.clone(),
    };
    // Unreadable and malformed fixtures are logged and left out
    let loaded = load_fixtures(&args.fixtures_dir, &selection)?;

    let classified = classify_corpus(&schemas, &response_types, loaded.corpus)?;
    let run = compute_report(&schemas, &classified, &response_types, &args.config())?;
    tracing::info!(
        covered = run.tally.covered,
        total = run.tally.total,
        error_fixtures = classified.error_fixtures.len(),
        "coverage computed"
    );

    if let Some(path) = &args.output {
        write_report(path, &run.report)?;
    }

    if args.percent_only {
        println!("{}", format_percent(run.report.total_percent));
    } else if args.json_output {
        println!("{}", report_to_string(&run.report, ReportFormat::Json)?);
    } else {
        let options = CoverageRenderOptions {
            color: !args.no_color,
        };
        print!("{}", render_coverage(&run.report, &options));
    }

    Ok(())
}
