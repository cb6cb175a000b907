//! Source Table Loader.
//!
//! Fetches a source, decodes it, and projects it onto its declared schema:
//! exactly the declared columns, in declared order, typed and renamed.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{Span, debug, info, info_span};

use crate::config::{ColumnKind, ColumnSpec, SourceKind, SourceSpec, SourcesConfig};
use crate::decode::{RawSheet, SourceFormat, decode, normalize_header};
use crate::error::{IngestError, Result};
use crate::fetch::fetch_bytes;

/// A loaded raw table.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub kind: SourceKind,
    pub frame: DataFrame,
}

/// The four raw tables of one run.
#[derive(Debug, Clone)]
pub struct LoadedSources {
    pub codes: DataFrame,
    pub index: DataFrame,
    pub descriptions: DataFrame,
    pub cross_references: DataFrame,
}

impl LoadedSources {
    pub fn frame(&self, kind: SourceKind) -> &DataFrame {
        match kind {
            SourceKind::Codes => &self.codes,
            SourceKind::Index => &self.index,
            SourceKind::Descriptions => &self.descriptions,
            SourceKind::CrossReferences => &self.cross_references,
        }
    }
}

/// Fetch, decode, and project one source.
pub fn load_source(kind: SourceKind, spec: &SourceSpec) -> Result<SourceTable> {
    let format = SourceFormat::from_location(&spec.location);
    let bytes = fetch_bytes(kind, &spec.location)?;
    debug!(source = %kind, bytes = bytes.len(), ?format, "fetched source");
    let sheet = decode(kind, format, bytes, &spec.sheet)?;
    let frame = project_sheet(kind, &spec.columns, &sheet)?;
    Ok(SourceTable { kind, frame })
}

/// Load all four sources.
///
/// The fetches have no data dependency on each other and run on scoped
/// threads. Any failure fails the whole load.
pub fn load_sources(config: &SourcesConfig) -> Result<LoadedSources> {
    let parent = Span::current();
    // Results come back in `SourceKind::ALL` order.
    let [codes, index, descriptions, cross_references] = std::thread::scope(|scope| {
        let handles = SourceKind::ALL.map(|kind| {
            let parent = parent.clone();
            let spec = config.spec(kind);
            scope.spawn(move || {
                let span = info_span!(parent: &parent, "source", source = %kind);
                let _guard = span.enter();
                let start = std::time::Instant::now();
                let table = load_source(kind, spec)?;
                info!(
                    source = %kind,
                    rows = table.frame.height(),
                    duration_ms = start.elapsed().as_millis(),
                    "source loaded"
                );
                Ok::<_, IngestError>(table)
            })
        });
        handles.map(|handle| {
            handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        })
    });

    Ok(LoadedSources {
        codes: codes?.frame,
        index: index?.frame,
        descriptions: descriptions?.frame,
        cross_references: cross_references?.frame,
    })
}

/// Project a decoded sheet onto the declared columns.
///
/// Fails with `SchemaMismatch` listing every declared header that is absent.
/// Rows whose declared cells are all empty are dropped.
pub fn project_sheet(
    kind: SourceKind,
    columns: &[ColumnSpec],
    sheet: &RawSheet,
) -> Result<DataFrame> {
    let positions: BTreeMap<String, usize> = sheet
        .headers
        .iter()
        .enumerate()
        .map(|(idx, header)| (normalize_header(header), idx))
        .rev()
        .collect();

    let mut missing = Vec::new();
    let mut selected = Vec::with_capacity(columns.len());
    for column in columns {
        match positions.get(&normalize_header(&column.source)) {
            Some(&idx) => selected.push((column, idx)),
            None => missing.push(column.source.clone()),
        }
    }
    if !missing.is_empty() {
        return Err(IngestError::SchemaMismatch {
            name: kind,
            missing,
            found: sheet.headers.clone(),
        });
    }

    let kept_rows: Vec<(usize, &Vec<Option<String>>)> = sheet
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            selected
                .iter()
                .any(|(_, idx)| row.get(*idx).is_some_and(Option::is_some))
        })
        .collect();

    let mut frame_columns: Vec<Column> = Vec::with_capacity(selected.len());
    for (column, idx) in selected {
        let cells = kept_rows
            .iter()
            .map(|(row_idx, row)| (*row_idx, row.get(idx).cloned().flatten()));
        let series = match column.kind {
            ColumnKind::Text => {
                let values: Vec<Option<String>> = cells.map(|(_, value)| value).collect();
                Series::new(column.rename.as_str().into(), values)
            }
            ColumnKind::Uint32 => {
                let values = cells
                    .map(|(row_idx, value)| parse_u32(kind, column, row_idx, value))
                    .collect::<Result<Vec<Option<u32>>>>()?;
                Series::new(column.rename.as_str().into(), values)
            }
        };
        frame_columns.push(series.into_column());
    }

    Ok(DataFrame::new(frame_columns)?)
}

fn parse_u32(
    kind: SourceKind,
    column: &ColumnSpec,
    row_idx: usize,
    value: Option<String>,
) -> Result<Option<u32>> {
    let Some(value) = value else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|_| IngestError::InvalidValue {
            name: kind,
            column: column.source.clone(),
            // One-based, counting the header row.
            row: row_idx + 2,
            value,
        })
}
