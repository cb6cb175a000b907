//! Artifact reader.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use polars::prelude::{ParquetReader, SerReader};

use naics_model::FinalRecord;
use naics_transform::records_from_frame;

use crate::error::{OutputError, Result};
use crate::format::ArtifactFormat;

/// Load a written artifact back into records. The format follows the extension.
pub fn read_artifact(path: &Path) -> Result<Vec<FinalRecord>> {
    let format = ArtifactFormat::from_path(path).ok_or_else(|| OutputError::UnknownFormat {
        path: path.to_path_buf(),
    })?;
    let file = File::open(path).map_err(|source| OutputError::Io {
        operation: "open",
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        ArtifactFormat::Parquet => {
            let frame = ParquetReader::new(file).finish()?;
            Ok(records_from_frame(&frame)?)
        }
        ArtifactFormat::Json => {
            serde_json::from_reader(BufReader::new(file)).map_err(|source| OutputError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
