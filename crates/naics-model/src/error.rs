use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid NAICS code '{0}': expected 2-6 digits after normalization")]
    InvalidCode(String),
    #[error("invalid hierarchy level {0}: expected 2-6")]
    InvalidLevel(u8),
    #[error("invalid sequence number {0}: source rows are numbered from 1")]
    InvalidSequence(u32),
    #[error("duplicate code '{code}' at sequence indexes {first} and {second}")]
    DuplicateCode { code: String, first: u32, second: u32 },
    #[error("duplicate sequence index {0}")]
    DuplicateSequence(u32),
}

pub type Result<T> = std::result::Result<T, ModelError>;
