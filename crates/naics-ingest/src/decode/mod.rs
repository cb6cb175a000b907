//! Decoding fetched bytes into a header row plus string cells.

mod delimited;
mod header;
mod workbook;

pub use delimited::read_delimited;
pub use header::normalize_header;
pub use workbook::{cell_to_value, read_workbook_sheet};

use crate::config::SourceKind;
use crate::error::Result;

/// Container format of a source, chosen from its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated text.
    Csv,
    /// Spreadsheet workbook (xlsx, xls, xlsb, ods).
    Workbook,
}

impl SourceFormat {
    /// Pick the format from the extension, ignoring any URL query or fragment.
    pub fn from_location(location: &str) -> Self {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_ascii_lowercase();
        if path.ends_with(".csv") {
            Self::Csv
        } else {
            Self::Workbook
        }
    }
}

/// A decoded sheet: header cells and data rows, empty cells as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Decode source bytes in the given format.
pub fn decode(
    name: SourceKind,
    format: SourceFormat,
    bytes: Vec<u8>,
    sheet: &str,
) -> Result<RawSheet> {
    match format {
        SourceFormat::Csv => read_delimited(name, &bytes),
        SourceFormat::Workbook => read_workbook_sheet(name, bytes, sheet),
    }
}
