//! CLI argument definitions for the `naics` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use naics_ingest::SourceKind;
use naics_output::ArtifactFormat;

#[derive(Parser)]
#[command(
    name = "naics",
    version,
    about = "Reconcile the NAICS source workbooks into one table",
    long_about = "Reconcile the NAICS code list, index file, descriptions and \
                  cross-references into one record per code.\n\n\
                  Writes a Parquet and/or JSON artifact with titles, cleaned \
                  descriptions, exclusions and illustrative examples."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the sources, reconcile them, and write the artifact.
    Run(RunArgs),

    /// Print the default source configuration as TOML.
    Config,

    /// Look up records in a written artifact.
    Query(QueryArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Source configuration file (TOML). Defaults to the 2022 Census workbooks.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override one source location, e.g. `--source descriptions=./desc.csv`.
    #[arg(long = "source", value_name = "KIND=LOCATION", value_parser = parse_source_override)]
    pub sources: Vec<(SourceKind, String)>,

    /// Artifact path; the extension is replaced per format.
    #[arg(long = "output", value_name = "PATH", default_value = "db_input.parquet")]
    pub output: PathBuf,

    /// Artifact format to write.
    #[arg(long = "format", value_enum, default_value = "parquet")]
    pub format: OutputFormatArg,

    /// Reconcile and report without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Parquet or JSON artifact written by `naics run`.
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Only codes at this level (2-6).
    #[arg(long = "level", value_parser = clap::value_parser!(u8).range(2..=6))]
    pub level: Option<u8>,

    /// Only codes starting with this prefix.
    #[arg(long = "code", value_name = "PREFIX")]
    pub code: Option<String>,

    /// Regular expression matched against title, description, examples and exclusions.
    #[arg(long = "search", value_name = "REGEX")]
    pub search: Option<String>,

    /// Maximum rows to print.
    #[arg(long = "limit", default_value_t = naics_cli::query::DEFAULT_LIMIT)]
    pub limit: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Parquet,
    Json,
    Both,
}

impl OutputFormatArg {
    pub fn formats(self) -> Vec<ArtifactFormat> {
        match self {
            Self::Parquet => vec![ArtifactFormat::Parquet],
            Self::Json => vec![ArtifactFormat::Json],
            Self::Both => ArtifactFormat::ALL.to_vec(),
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_source_override(value: &str) -> Result<(SourceKind, String), String> {
    let (kind, location) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=LOCATION, got '{value}'"))?;
    let kind = kind.parse::<SourceKind>().map_err(|error| error.to_string())?;
    let location = location.trim();
    if location.is_empty() {
        return Err(format!("empty location for source '{kind}'"));
    }
    Ok((kind, location.to_string()))
}
