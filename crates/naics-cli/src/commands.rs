use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use tracing::{info, info_span};

use naics_cli::pipeline::{RunOptions, RunResult, run_pipeline_with};
use naics_cli::query::{RecordFilter, query_records};
use naics_ingest::SourcesConfig;
use naics_output::read_artifact;

use crate::cli::{QueryArgs, RunArgs};
use crate::summary::print_query_results;

pub fn run_config() -> Result<()> {
    let toml = SourcesConfig::default()
        .to_toml_string()
        .context("serialize default configuration")?;
    print!("{toml}");
    Ok(())
}

pub fn run_reconcile(args: &RunArgs) -> Result<RunResult> {
    let mut sources = match &args.config {
        Some(path) => SourcesConfig::load(path)
            .with_context(|| format!("load configuration {}", path.display()))?,
        None => SourcesConfig::default(),
    };
    for (kind, location) in &args.sources {
        info!(source = %kind, location = %location, "source location overridden");
        sources.spec_mut(*kind).location.clone_from(location);
    }

    let options = RunOptions {
        sources,
        output: args.output.clone(),
        formats: args.format.formats(),
        dry_run: args.dry_run,
    };

    let spinner = stage_spinner();
    let result = run_pipeline_with(&options, |stage| spinner.set_message(stage.label()));
    spinner.finish_and_clear();
    result
}

pub fn run_query(args: &QueryArgs) -> Result<()> {
    let span = info_span!("query", artifact = %args.artifact.display());
    let _guard = span.enter();

    let search = args
        .search
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("compile search pattern")?;
    let filter = RecordFilter {
        level: args.level,
        code_prefix: args.code.clone(),
        search,
        limit: args.limit,
    };

    let records = read_artifact(&args.artifact)
        .with_context(|| format!("read artifact {}", args.artifact.display()))?;
    let found = query_records(&records, &filter);
    info!(rows = records.len(), matched = found.len(), "query complete");
    print_query_results(&found);
    Ok(())
}

fn stage_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "]);
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
