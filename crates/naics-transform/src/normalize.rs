//! Code Normalizer: validated titles records and the known-code set.

use std::collections::{BTreeMap, BTreeSet};

use naics_model::{CodeRecord, ModelError};

use crate::error::Result;
use crate::tables::TitleRow;

/// Validate titles rows into [`CodeRecord`]s, preserving source order.
///
/// Codes are already range-normalized by the table reader; here they are
/// checked as 2-6 digit strings. A normalized code or a sequence index that
/// occurs twice is an error, since both are join keys downstream.
pub fn normalize_titles(rows: &[TitleRow]) -> Result<Vec<CodeRecord>> {
    let mut by_code: BTreeMap<&str, u32> = BTreeMap::new();
    let mut sequences: BTreeSet<u32> = BTreeSet::new();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let record = CodeRecord::from_source_row(row.seq_no, &row.code, row.title.as_str())?;
        if !sequences.insert(record.sequence_index) {
            return Err(ModelError::DuplicateSequence(record.sequence_index).into());
        }
        if let Some(first) = by_code.insert(row.code.as_str(), record.sequence_index) {
            return Err(ModelError::DuplicateCode {
                code: row.code.clone(),
                first,
                second: record.sequence_index,
            }
            .into());
        }
        records.push(record);
    }
    Ok(records)
}

/// The set of every normalized code in the titles source.
pub fn known_codes(records: &[CodeRecord]) -> BTreeSet<String> {
    records
        .iter()
        .map(|record| record.code.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use naics_model::Level;

    fn row(seq_no: u32, code: &str, title: &str) -> TitleRow {
        TitleRow {
            seq_no,
            code: code.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn records_carry_level_and_zero_based_index() {
        let records =
            normalize_titles(&[row(1, "31", "Manufacturing"), row(2, "311", "Food")]).unwrap();
        assert_eq!(records[0].sequence_index, 0);
        assert_eq!(records[0].level, Level::SECTOR);
        assert_eq!(records[1].level, Level::SUBSECTOR);
        assert_eq!(known_codes(&records).len(), 2);
    }

    #[test]
    fn duplicate_code_is_rejected() {
        let err = normalize_titles(&[row(1, "31", "Manufacturing"), row(2, "31", "Again")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate code '31' at sequence indexes 0 and 1"
        );
    }

    #[test]
    fn duplicate_sequence_is_rejected() {
        let err = normalize_titles(&[row(4, "11", "A"), row(4, "21", "B")]).unwrap_err();
        assert_eq!(err.to_string(), "duplicate sequence index 3");
    }

    #[test]
    fn non_digit_code_is_rejected() {
        let err = normalize_titles(&[row(1, "3X", "Bad")]).unwrap_err();
        assert!(err.to_string().contains("3X"));
    }
}
