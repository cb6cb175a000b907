//! Artifact writers.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use polars::prelude::ParquetWriter;
use tracing::{debug, info};

use naics_model::FinalRecord;
use naics_transform::records_to_frame;

use crate::error::{OutputError, Result};
use crate::format::ArtifactFormat;
use crate::hash::sha256_hex;

/// One written artifact file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifact {
    pub format: ArtifactFormat,
    pub path: PathBuf,
    pub rows: usize,
    pub bytes: usize,
    /// Hex SHA-256 of the file contents.
    pub sha256: String,
}

/// Encode records in the given format.
pub fn encode_records(
    records: &[FinalRecord],
    format: ArtifactFormat,
    path: &Path,
) -> Result<Vec<u8>> {
    match format {
        ArtifactFormat::Parquet => {
            let mut frame = records_to_frame(records)?;
            let mut buffer = Vec::new();
            ParquetWriter::new(&mut buffer).finish(&mut frame)?;
            Ok(buffer)
        }
        ArtifactFormat::Json => {
            serde_json::to_vec_pretty(records).map_err(|source| OutputError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Write records to `path` in `format`.
///
/// The encoded bytes go to a temporary sibling first and are renamed over
/// `path` only after a successful sync.
pub fn write_artifact(
    records: &[FinalRecord],
    path: &Path,
    format: ArtifactFormat,
) -> Result<WrittenArtifact> {
    let bytes = encode_records(records, format, path)?;
    persist(format, path.to_path_buf(), &bytes, records.len())
}

/// Write every requested format next to `base`, replacing its extension.
///
/// All formats are encoded before any file is touched.
pub fn write_artifacts(
    records: &[FinalRecord],
    base: &Path,
    formats: &[ArtifactFormat],
) -> Result<Vec<WrittenArtifact>> {
    let encoded = formats
        .iter()
        .map(|format| {
            let path = format.path_for(base);
            let bytes = encode_records(records, *format, &path)?;
            Ok((*format, path, bytes))
        })
        .collect::<Result<Vec<_>>>()?;

    encoded
        .into_iter()
        .map(|(format, path, bytes)| persist(format, path, &bytes, records.len()))
        .collect()
}

fn persist(
    format: ArtifactFormat,
    path: PathBuf,
    bytes: &[u8],
    rows: usize,
) -> Result<WrittenArtifact> {
    write_atomic(&path, bytes)?;
    let artifact = WrittenArtifact {
        format,
        path,
        rows,
        bytes: bytes.len(),
        sha256: sha256_hex(bytes),
    };
    info!(
        format = %format,
        path = %artifact.path.display(),
        rows = artifact.rows,
        bytes = artifact.bytes,
        sha256 = %artifact.sha256,
        "artifact written"
    );
    Ok(artifact)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write bytes to a temp sibling, sync, and rename into place.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);
    let mut file = File::create(&temp_path).map_err(|source| OutputError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;
    file.write_all(bytes).map_err(|source| OutputError::Io {
        operation: "write",
        path: temp_path.clone(),
        source,
    })?;
    file.sync_all().map_err(|source| OutputError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source,
    })?;
    drop(file);

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        OutputError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "renamed into place");
    Ok(())
}
