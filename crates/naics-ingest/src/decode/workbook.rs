//! Spreadsheet sources (xlsx, xls, xlsb, ods) via calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use crate::config::SourceKind;
use crate::error::{IngestError, Result};

use super::RawSheet;

/// Read one worksheet from workbook bytes.
///
/// The first non-empty row of the used range is the header row. A missing
/// sheet is a schema mismatch: the declared selector does not exist.
pub fn read_workbook_sheet(name: SourceKind, bytes: Vec<u8>, sheet: &str) -> Result<RawSheet> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| IngestError::Workbook {
            name,
            message: e.to_string(),
        })?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|candidate| candidate == sheet) {
        return Err(IngestError::SchemaMismatch {
            name,
            missing: vec![format!("sheet '{sheet}'")],
            found: sheet_names,
        });
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| IngestError::Workbook {
            name,
            message: format!("sheet '{sheet}': {e}"),
        })?;

    let mut rows = range
        .rows()
        .skip_while(|row| row.iter().all(|cell| cell_to_value(cell).is_none()));

    let Some(header_row) = rows.next() else {
        return Ok(RawSheet::default());
    };
    let headers = header_row
        .iter()
        .map(|cell| cell_to_value(cell).unwrap_or_default())
        .collect();
    let rows = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    Ok(RawSheet { headers, rows })
}

/// Render a cell as a string, `None` for empty cells.
///
/// Integral floats render without a fractional part so numeric code cells
/// (`111110.0`) become the digit strings the pipeline joins on.
pub fn cell_to_value(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(value) => {
            if value.trim().is_empty() {
                None
            } else {
                Some(value.clone())
            }
        }
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(format_float(*value)),
        Data::Bool(value) => Some(value.to_string()),
        other => Some(other.to_string()),
    }
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{value}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_render_as_digits() {
        assert_eq!(cell_to_value(&Data::Float(111110.0)).as_deref(), Some("111110"));
        assert_eq!(cell_to_value(&Data::Float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(cell_to_value(&Data::Int(42)).as_deref(), Some("42"));
    }

    #[test]
    fn blank_cells_are_none() {
        assert_eq!(cell_to_value(&Data::Empty), None);
        assert_eq!(cell_to_value(&Data::String("  ".to_string())), None);
    }

    #[test]
    fn string_cells_are_kept_verbatim() {
        assert_eq!(
            cell_to_value(&Data::String(" 31-33 ".to_string())).as_deref(),
            Some(" 31-33 ")
        );
    }

    #[test]
    fn garbage_bytes_are_a_workbook_error() {
        let err = read_workbook_sheet(SourceKind::Codes, b"not a workbook".to_vec(), "Sheet1")
            .unwrap_err();
        assert!(matches!(err, IngestError::Workbook { .. }));
    }
}
