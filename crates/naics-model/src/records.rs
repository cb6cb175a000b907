//! Record types flowing through the reconciliation pipeline.

use serde::{Deserialize, Serialize};

use crate::code::{Level, NaicsCode};
use crate::error::{ModelError, Result};

/// One row of the titles source: the driving table of the final join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRecord {
    /// Zero-based position of the row in the titles source.
    pub sequence_index: u32,
    pub level: Level,
    pub code: NaicsCode,
    pub title: String,
}

impl CodeRecord {
    pub fn new(sequence_index: u32, code: NaicsCode, title: impl Into<String>) -> Self {
        Self {
            sequence_index,
            level: code.level(),
            code,
            title: title.into(),
        }
    }

    /// Build a record from the source's one-based `Seq. No.`.
    pub fn from_source_row(seq_no: u32, raw_code: &str, title: impl Into<String>) -> Result<Self> {
        let sequence_index = seq_no
            .checked_sub(1)
            .ok_or(ModelError::InvalidSequence(seq_no))?;
        Ok(Self::new(sequence_index, NaicsCode::new(raw_code)?, title))
    }
}

/// One segment of a code's narrative cell after splitting and cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionBlock {
    pub code: String,
    /// 1-based position within the code.
    pub block_id: u32,
    /// Cleaned text; `None` when cleanup left nothing.
    pub text: Option<String>,
}

impl DescriptionBlock {
    pub fn new(code: impl Into<String>, block_id: u32, text: Option<String>) -> Self {
        Self {
            code: code.into(),
            block_id,
            text,
        }
    }

    pub fn text_contains(&self, needle: &str) -> bool {
        self.text.as_deref().is_some_and(|text| text.contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDescription {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExclusion {
    pub code: String,
    pub excluded: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExample {
    pub code: String,
    pub examples: Option<Vec<String>>,
}

/// One fully reconciled output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalRecord {
    pub sequence_index: u32,
    pub level: Level,
    pub code: NaicsCode,
    pub title: String,
    pub description: Option<String>,
    pub excluded: Option<String>,
    pub examples: Option<Vec<String>>,
}

impl FinalRecord {
    /// Start an output row from its titles record with every joined field null.
    pub fn from_code_record(record: &CodeRecord) -> Self {
        Self {
            sequence_index: record.sequence_index,
            level: record.level,
            code: record.code.clone(),
            title: record.title.clone(),
            description: None,
            excluded: None,
            examples: None,
        }
    }
}
