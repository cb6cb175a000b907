//! Artifact formats.

use std::fmt;
use std::path::{Path, PathBuf};

/// On-disk encoding of the reconciled table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFormat {
    /// Columnar Parquet with typed, nullable columns.
    Parquet,
    /// Pretty-printed JSON array of records.
    Json,
}

impl ArtifactFormat {
    pub const ALL: [ArtifactFormat; 2] = [ArtifactFormat::Parquet, ArtifactFormat::Json];

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Json => "json",
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }

    /// The path for this format: `base` with its extension replaced.
    pub fn path_for(self, base: &Path) -> PathBuf {
        base.with_extension(self.extension())
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Parquet => "Parquet",
            Self::Json => "JSON",
        })
    }
}
