//! Typed row extraction from loaded DataFrames.
//!
//! Every code read here is passed through [`normalize_code`] so later joins
//! only ever see canonical codes.

use polars::prelude::{DataFrame, StringChunked, UInt32Chunked};

use naics_ingest::fields;
use naics_model::normalize_code;

use crate::error::{Result, TransformError};

/// One titles row before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRow {
    pub seq_no: u32,
    pub code: String,
    pub title: String,
}

/// One `(code, value)` row of an auxiliary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeValueRow {
    pub code: String,
    pub value: Option<String>,
}

fn str_column<'a>(frame: &'a DataFrame, table: &str, column: &str) -> Result<&'a StringChunked> {
    let col = frame
        .column(column)
        .map_err(|_| TransformError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        })?;
    Ok(col.str()?)
}

fn u32_column<'a>(frame: &'a DataFrame, table: &str, column: &str) -> Result<&'a UInt32Chunked> {
    let col = frame
        .column(column)
        .map_err(|_| TransformError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        })?;
    Ok(col.u32()?)
}

fn missing(table: &str, column: &str, row: usize) -> TransformError {
    TransformError::MissingValue {
        table: table.to_string(),
        column: column.to_string(),
        row,
    }
}

/// Read the titles table. Sequence number and code are required; a missing
/// title reads as empty.
pub fn title_rows(frame: &DataFrame) -> Result<Vec<TitleRow>> {
    const TABLE: &str = "codes";
    let seq = u32_column(frame, TABLE, fields::INDEX)?;
    let codes = str_column(frame, TABLE, fields::CODE)?;
    let titles = str_column(frame, TABLE, fields::TITLE)?;

    let mut rows = Vec::with_capacity(frame.height());
    for row in 0..frame.height() {
        let seq_no = seq.get(row).ok_or_else(|| missing(TABLE, fields::INDEX, row))?;
        let code = codes.get(row).ok_or_else(|| missing(TABLE, fields::CODE, row))?;
        let title = titles.get(row).unwrap_or_default();
        rows.push(TitleRow {
            seq_no,
            code: normalize_code(code),
            title: title.to_string(),
        });
    }
    Ok(rows)
}

/// Read `(code, value_column)` pairs in source order. Rows without a code
/// cannot join to anything and are skipped.
pub fn code_value_rows(frame: &DataFrame, table: &str, value_column: &str) -> Result<Vec<CodeValueRow>> {
    let codes = str_column(frame, table, fields::CODE)?;
    let values = str_column(frame, table, value_column)?;

    Ok(codes
        .into_iter()
        .zip(values)
        .filter_map(|(code, value)| {
            let code = normalize_code(code?);
            (!code.is_empty()).then(|| CodeValueRow {
                code,
                value: value.map(str::to_string),
            })
        })
        .collect())
}
