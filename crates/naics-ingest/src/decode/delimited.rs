//! CSV sources.

use csv::ReaderBuilder;

use crate::config::SourceKind;
use crate::error::{IngestError, Result};

use super::RawSheet;

/// Read comma-separated bytes. The first record is the header row.
///
/// Quoted fields keep embedded line breaks, so multi-line description cells
/// survive intact. Rows may be ragged; missing trailing cells are `None`.
pub fn read_delimited(name: SourceKind, bytes: &[u8]) -> Result<RawSheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Csv {
            name,
            message: e.to_string(),
        })?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::Csv {
            name,
            message: e.to_string(),
        })?;
        let row: Vec<Option<String>> = record
            .iter()
            .map(|value| {
                if value.trim().is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(RawSheet { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_quoted_multiline_cells() {
        let bytes = b"Code,Description\n11,\"First line\r\nSecond line\"\n111,\n";
        let sheet = read_delimited(SourceKind::Descriptions, bytes).unwrap();

        assert_eq!(sheet.headers, vec!["Code", "Description"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(
            sheet.rows[0][1].as_deref(),
            Some("First line\r\nSecond line")
        );
        assert_eq!(sheet.rows[1][1], None);
    }

    #[test]
    fn ragged_rows_are_accepted() {
        let bytes = b"Code,Cross-Reference\n11\n";
        let sheet = read_delimited(SourceKind::CrossReferences, bytes).unwrap();
        assert_eq!(sheet.rows, vec![vec![Some("11".to_string())]]);
    }
}
