//! Staged run: ingest, reconcile, output.
//!
//! Each stage runs inside its own span and hands a typed result to the next.
//! Nothing is written unless ingest and reconcile both succeed.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use naics_ingest::{LoadedSources, SourceKind, SourcesConfig, load_sources};
use naics_output::{ArtifactFormat, WrittenArtifact, write_artifacts};
use naics_transform::{ReconcileStats, Reconciled, reconcile};

/// Stages reported to a progress observer, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    Reconcile,
    Output,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ingest => "Fetching sources",
            Self::Reconcile => "Reconciling",
            Self::Output => "Writing artifacts",
        }
    }
}

/// Everything a run needs besides the sources themselves.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub sources: SourcesConfig,
    /// Artifact base path; each format replaces the extension.
    pub output: PathBuf,
    pub formats: Vec<ArtifactFormat>,
    /// Reconcile and report without writing anything.
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new(sources: SourcesConfig, output: impl Into<PathBuf>) -> Self {
        Self {
            sources,
            output: output.into(),
            formats: vec![ArtifactFormat::Parquet],
            dry_run: false,
        }
    }
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct RunResult {
    pub stats: ReconcileStats,
    /// Row counts per source, in load order.
    pub source_rows: Vec<(SourceKind, usize)>,
    pub artifacts: Vec<WrittenArtifact>,
    pub output: PathBuf,
    pub dry_run: bool,
    pub elapsed: Duration,
}

/// Stage 1: fetch and decode the four sources.
pub fn ingest(config: &SourcesConfig) -> Result<LoadedSources> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let start = Instant::now();

    config.validate().context("validate source configuration")?;
    let sources = load_sources(config).context("load sources")?;
    info!(
        codes = sources.codes.height(),
        index = sources.index.height(),
        descriptions = sources.descriptions.height(),
        cross_references = sources.cross_references.height(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(sources)
}

/// Stage 2: run the reconciliation.
pub fn reconcile_sources(sources: &LoadedSources) -> Result<Reconciled> {
    reconcile(sources).context("reconcile sources")
}

/// Stage 3: write every requested format atomically.
pub fn output(
    reconciled: &Reconciled,
    base: &Path,
    formats: &[ArtifactFormat],
) -> Result<Vec<WrittenArtifact>> {
    let span = info_span!("output", base = %base.display());
    let _guard = span.enter();
    let start = Instant::now();

    let artifacts = write_artifacts(&reconciled.records, base, formats)
        .with_context(|| format!("write artifacts to {}", base.display()))?;
    info!(
        files = artifacts.len(),
        rows = reconciled.records.len(),
        duration_ms = start.elapsed().as_millis(),
        "output complete"
    );
    Ok(artifacts)
}

/// Run all stages in order.
pub fn run_pipeline(options: &RunOptions) -> Result<RunResult> {
    run_pipeline_with(options, |_| {})
}

/// Run all stages in order, calling `on_stage` as each one starts.
pub fn run_pipeline_with(
    options: &RunOptions,
    mut on_stage: impl FnMut(Stage),
) -> Result<RunResult> {
    let start = Instant::now();

    on_stage(Stage::Ingest);
    let sources = ingest(&options.sources)?;
    let source_rows = SourceKind::ALL
        .into_iter()
        .map(|kind| (kind, sources.frame(kind).height()))
        .collect();

    on_stage(Stage::Reconcile);
    let reconciled = reconcile_sources(&sources)?;

    let artifacts = if options.dry_run {
        info!(rows = reconciled.records.len(), "dry run, nothing written");
        Vec::new()
    } else {
        on_stage(Stage::Output);
        output(&reconciled, &options.output, &options.formats)?
    };

    Ok(RunResult {
        stats: reconciled.stats,
        source_rows,
        artifacts,
        output: options.output.clone(),
        dry_run: options.dry_run,
        elapsed: start.elapsed(),
    })
}
