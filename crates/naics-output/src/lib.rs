//! Reconciled NAICS artifact output.
//!
//! Writes the final table as Parquet and/or JSON with atomic replacement,
//! reports a SHA-256 digest per file, and reads either format back.

mod error;
mod format;
mod hash;
mod read;
mod write;

pub use error::{OutputError, Result};
pub use format::ArtifactFormat;
pub use hash::{file_sha256, sha256_hex};
pub use read::read_artifact;
pub use write::{WrittenArtifact, encode_records, write_artifact, write_artifacts, write_atomic};
