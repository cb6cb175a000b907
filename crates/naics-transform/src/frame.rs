//! Conversion between reconciled records and the output DataFrame.
//!
//! Column order and types are the artifact contract:
//! `sequence_index u32, level u8, code str, title str, description str?,
//! excluded str?, examples list[str]?`.

use polars::prelude::{
    Column, DataFrame, IntoSeries, ListBuilderTrait, ListStringChunkedBuilder, NamedFrom, Series,
};

use naics_model::{FinalRecord, Level, ModelError, NaicsCode};

use crate::error::{Result, TransformError};

pub mod columns {
    pub const SEQUENCE_INDEX: &str = "sequence_index";
    pub const LEVEL: &str = "level";
    pub const CODE: &str = "code";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const EXCLUDED: &str = "excluded";
    pub const EXAMPLES: &str = "examples";

    pub const ALL: [&str; 7] = [
        SEQUENCE_INDEX,
        LEVEL,
        CODE,
        TITLE,
        DESCRIPTION,
        EXCLUDED,
        EXAMPLES,
    ];
}

/// Build the output frame, one row per record, in record order.
pub fn records_to_frame(records: &[FinalRecord]) -> Result<DataFrame> {
    let sequence: Vec<u32> = records.iter().map(|r| r.sequence_index).collect();
    let level: Vec<u8> = records.iter().map(|r| r.level.get()).collect();
    let code: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
    let title: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    let description: Vec<Option<&str>> =
        records.iter().map(|r| r.description.as_deref()).collect();
    let excluded: Vec<Option<&str>> = records.iter().map(|r| r.excluded.as_deref()).collect();

    let values_capacity = records
        .iter()
        .filter_map(|r| r.examples.as_ref())
        .map(Vec::len)
        .sum();
    let mut examples =
        ListStringChunkedBuilder::new(columns::EXAMPLES.into(), records.len(), values_capacity);
    for record in records {
        match &record.examples {
            Some(items) => examples.append_values_iter(items.iter().map(String::as_str)),
            None => examples.append_null(),
        }
    }

    let frame_columns: Vec<Column> = vec![
        Series::new(columns::SEQUENCE_INDEX.into(), sequence).into(),
        Series::new(columns::LEVEL.into(), level).into(),
        Series::new(columns::CODE.into(), code).into(),
        Series::new(columns::TITLE.into(), title).into(),
        Series::new(columns::DESCRIPTION.into(), description).into(),
        Series::new(columns::EXCLUDED.into(), excluded).into(),
        examples.finish().into_series().into(),
    ];
    Ok(DataFrame::new(frame_columns)?)
}

fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column> {
    frame
        .column(name)
        .map_err(|_| TransformError::MissingColumn {
            table: "artifact".to_string(),
            column: name.to_string(),
        })
}

fn required<T>(value: Option<T>, column: &str, row: usize) -> Result<T> {
    value.ok_or_else(|| TransformError::MissingValue {
        table: "artifact".to_string(),
        column: column.to_string(),
        row,
    })
}

/// Read records back from an output frame, validating codes and levels.
pub fn records_from_frame(frame: &DataFrame) -> Result<Vec<FinalRecord>> {
    let sequence = column(frame, columns::SEQUENCE_INDEX)?.u32()?;
    let level = column(frame, columns::LEVEL)?.u8()?;
    let code = column(frame, columns::CODE)?.str()?;
    let title = column(frame, columns::TITLE)?.str()?;
    let description = column(frame, columns::DESCRIPTION)?.str()?;
    let excluded = column(frame, columns::EXCLUDED)?.str()?;
    let examples = column(frame, columns::EXAMPLES)?.list()?;

    let mut records = Vec::with_capacity(frame.height());
    for row in 0..frame.height() {
        let code = NaicsCode::new(required(code.get(row), columns::CODE, row)?)?;
        let level = Level::new(required(level.get(row), columns::LEVEL, row)?)?;
        if level != code.level() {
            return Err(ModelError::InvalidLevel(level.get()).into());
        }
        let items: Option<Vec<String>> = match examples.get_as_series(row) {
            Some(series) => Some(
                series
                    .str()?
                    .into_iter()
                    .flatten()
                    .map(str::to_string)
                    .collect(),
            ),
            None => None,
        };
        records.push(FinalRecord {
            sequence_index: required(sequence.get(row), columns::SEQUENCE_INDEX, row)?,
            level,
            code,
            title: title.get(row).unwrap_or_default().to_string(),
            description: description.get(row).map(str::to_string),
            excluded: excluded.get(row).map(str::to_string),
            examples: items,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seq: u32, code: &str, examples: Option<Vec<&str>>) -> FinalRecord {
        let code = NaicsCode::new(code).unwrap();
        FinalRecord {
            sequence_index: seq,
            level: code.level(),
            code,
            title: format!("Title {seq}"),
            description: (seq % 2 == 0).then(|| "Described.".to_string()),
            excluded: None,
            examples: examples.map(|items| items.into_iter().map(str::to_string).collect()),
        }
    }

    #[test]
    fn frame_has_contract_columns() {
        let records = vec![
            record(0, "11", None),
            record(1, "111110", Some(vec!["Soybean farming", "Soybeans, growing"])),
        ];
        let frame = records_to_frame(&records).unwrap();
        let names: Vec<&str> = frame
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, columns::ALL.to_vec());
        assert_eq!(frame.height(), 2);

        let back = records_from_frame(&frame).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn empty_records_build_an_empty_frame() {
        let frame = records_to_frame(&[]).unwrap();
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), columns::ALL.len());
    }

    #[test]
    fn mismatched_level_is_rejected() {
        let records = vec![record(0, "111", None)];
        let mut frame = records_to_frame(&records).unwrap();
        frame
            .with_column(Series::new(columns::LEVEL.into(), vec![4u8]))
            .unwrap();
        assert!(records_from_frame(&frame).is_err());
    }
}
