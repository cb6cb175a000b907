//! Reconciliation pipeline with explicit stages.
//!
//! Stages run strictly in order, each consuming the previous stage's tables:
//! 1. **Normalize**: titles to validated code records, known-code set
//! 2. **Segment**: description cells to numbered, cleaned blocks
//! 3. **Classify**: marker exclusions, example tails, narrative
//! 4. **Exclusions**: recover references, merge with cross-references
//! 5. **Examples**: narrative tails over index items
//! 6. **Hierarchy**: fill level-4/level-5 descriptions from children
//! 7. **Assemble**: left-join onto the titles

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info, info_span};

use naics_ingest::{LoadedSources, fields};
use naics_model::FinalRecord;

use crate::assemble::assemble;
use crate::classify::{classify_blocks, narrative_descriptions};
use crate::error::Result;
use crate::examples::resolve_examples;
use crate::exclusions::{recover_exclusions, resolve_exclusions};
use crate::hierarchy::fill_descriptions;
use crate::normalize::{known_codes, normalize_titles};
use crate::segment::segment_descriptions;
use crate::tables::{code_value_rows, title_rows};

/// Counts collected across one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub codes: usize,
    pub titles: usize,
    pub index_example_groups: usize,
    pub description_rows: usize,
    pub description_blocks: usize,
    pub marker_exclusions: usize,
    pub recovered_exclusions: usize,
    pub explicit_exclusion_groups: usize,
    pub exclusion_groups: usize,
    pub narrative_example_groups: usize,
    pub example_groups: usize,
    pub descriptions_total: usize,
    pub descriptions_complete: usize,
    pub missing_level4: usize,
    pub filled_level4: usize,
    pub missing_level5: usize,
    pub filled_level5: usize,
    pub rows: usize,
}

impl ReconcileStats {
    /// Label/value pairs in pipeline order, for reporting.
    pub fn entries(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("Codes", self.codes),
            ("Titles", self.titles),
            ("Index example groups", self.index_example_groups),
            ("Description rows", self.description_rows),
            ("Description blocks", self.description_blocks),
            ("Marker exclusions", self.marker_exclusions),
            ("Recovered exclusions", self.recovered_exclusions),
            ("Cross-reference groups", self.explicit_exclusion_groups),
            ("Exclusion groups", self.exclusion_groups),
            ("Narrative example groups", self.narrative_example_groups),
            ("Example groups", self.example_groups),
            ("Descriptions (total)", self.descriptions_total),
            ("Descriptions (complete)", self.descriptions_complete),
            ("Missing level 4", self.missing_level4),
            ("Filled level 4", self.filled_level4),
            ("Missing level 5", self.missing_level5),
            ("Filled level 5", self.filled_level5),
            ("Output rows", self.rows),
        ]
    }
}

/// Reconciled records and run statistics.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub records: Vec<FinalRecord>,
    pub stats: ReconcileStats,
}

/// Run the full reconciliation over loaded sources.
pub fn reconcile(sources: &LoadedSources) -> Result<Reconciled> {
    let span = info_span!("reconcile");
    let _guard = span.enter();
    let start = Instant::now();
    let mut stats = ReconcileStats::default();

    let titles = info_span!("normalize").in_scope(|| -> Result<_> {
        let titles = normalize_titles(&title_rows(&sources.codes)?)?;
        Ok(titles)
    })?;
    let known = known_codes(&titles);
    stats.codes = known.len();
    stats.titles = titles.len();
    info!(codes = stats.codes, titles = stats.titles, "titles normalized");

    let index_rows = code_value_rows(&sources.index, "index", fields::EXAMPLES)?;
    let description_rows =
        code_value_rows(&sources.descriptions, "descriptions", fields::DESCRIPTION)?;
    let cross_reference_rows =
        code_value_rows(&sources.cross_references, "cross_references", fields::EXCLUDED)?;
    stats.description_rows = description_rows.len();

    let segmented = info_span!("segment").in_scope(|| segment_descriptions(&description_rows));
    stats.description_blocks = segmented.blocks.len();
    debug!(
        description_rows = stats.description_rows,
        description_blocks = stats.description_blocks,
        example_markers = segmented.example_markers.len(),
        "descriptions segmented"
    );

    let classified = info_span!("classify")
        .in_scope(|| classify_blocks(segmented.blocks, &segmented.example_markers));
    stats.marker_exclusions = classified.marker_exclusions.len();

    let marker_codes: BTreeSet<String> = classified
        .marker_exclusions
        .iter()
        .map(|block| block.code.clone())
        .collect();
    let (narrative, recovered) = info_span!("recover_exclusions")
        .in_scope(|| recover_exclusions(classified.narrative, &marker_codes, &known));
    stats.recovered_exclusions = recovered.len();
    debug!(
        marker_exclusions = stats.marker_exclusions,
        recovered_exclusions = stats.recovered_exclusions,
        example_tail_blocks = classified.example_tail.len(),
        narrative_blocks = narrative.len(),
        "blocks classified"
    );

    let mut exclusion_blocks = classified.marker_exclusions;
    exclusion_blocks.extend(recovered);
    let exclusions = resolve_exclusions(&cross_reference_rows, &exclusion_blocks);
    stats.explicit_exclusion_groups = exclusions.explicit_groups;
    stats.exclusion_groups = exclusions.exclusions.len();
    info!(
        explicit = exclusions.explicit_groups,
        from_blocks = exclusions.block_groups,
        both = exclusions.conflicts,
        total = stats.exclusion_groups,
        "exclusions resolved"
    );

    let examples = resolve_examples(&index_rows, &classified.example_tail);
    stats.index_example_groups = examples.index_groups;
    stats.narrative_example_groups = examples.narrative_groups;
    stats.example_groups = examples.examples.len();
    info!(
        index = stats.index_example_groups,
        narrative = stats.narrative_example_groups,
        total = stats.example_groups,
        "examples resolved"
    );

    let raw_descriptions = narrative_descriptions(&segmented.codes, &narrative);
    let filled = info_span!("hierarchy").in_scope(|| fill_descriptions(&raw_descriptions));
    stats.descriptions_total = raw_descriptions.len();
    stats.descriptions_complete = filled.complete;
    stats.missing_level4 = filled.missing_level4;
    stats.filled_level4 = filled.filled_level4;
    stats.missing_level5 = filled.missing_level5;
    stats.filled_level5 = filled.filled_level5;
    info!(
        total = stats.descriptions_total,
        complete = stats.descriptions_complete,
        missing_level4 = stats.missing_level4,
        filled_level4 = stats.filled_level4,
        missing_level5 = stats.missing_level5,
        filled_level5 = stats.filled_level5,
        "descriptions filled"
    );

    let records = assemble(
        &titles,
        &filled.descriptions,
        &exclusions.exclusions,
        &examples.examples,
    );
    stats.rows = records.len();
    info!(
        rows = stats.rows,
        duration_ms = start.elapsed().as_millis(),
        "reconcile complete"
    );

    Ok(Reconciled { records, stats })
}
