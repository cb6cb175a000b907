//! NAICS classification data model.
//!
//! Types shared by the ingest, transform, and output crates:
//!
//! - **code**: [`NaicsCode`], [`Level`], and the combined-range normalizer
//! - **records**: the per-stage record types and the final output row

pub mod code;
pub mod error;
pub mod records;

pub use code::{Level, NaicsCode, RANGE_CODES, normalize_code, normalize_range_codes_in_text};
pub use error::{ModelError, Result};
pub use records::{
    CodeRecord, DescriptionBlock, FinalRecord, ResolvedDescription, ResolvedExample,
    ResolvedExclusion,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_record_level_matches_code() {
        let record = CodeRecord::from_source_row(1, "31-33", "Manufacturing").unwrap();
        assert_eq!(record.sequence_index, 0);
        assert_eq!(record.code.as_str(), "31");
        assert_eq!(record.level, Level::SECTOR);
    }

    #[test]
    fn zero_sequence_number_is_rejected() {
        let err = CodeRecord::from_source_row(0, "11", "Agriculture").unwrap_err();
        assert_eq!(err, ModelError::InvalidSequence(0));
    }
}
