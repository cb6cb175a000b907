//! Fetch primitive: raw bytes of a source from a URL or a local path.

use std::path::Path;

use reqwest::header::{HeaderValue, USER_AGENT};

use crate::config::SourceKind;
use crate::error::{IngestError, Result};

/// User agent string for source downloads.
const USER_AGENT_VALUE: &str = concat!("naics-reconcile/", env!("CARGO_PKG_VERSION"));

/// Returns true when the location must be fetched over HTTP.
pub fn is_remote(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetch the raw bytes of a source.
///
/// Remote locations use a blocking HTTP GET; everything else is read from disk.
/// Any failure, including a non-success HTTP status, is `SourceUnavailable`.
pub fn fetch_bytes(name: SourceKind, location: &str) -> Result<Vec<u8>> {
    if is_remote(location) {
        fetch_remote(name, location)
    } else {
        read_local(name, location)
    }
}

fn fetch_remote(name: SourceKind, url: &str) -> Result<Vec<u8>> {
    tracing::debug!(source = %name, url, "downloading source");

    let client = reqwest::blocking::Client::new();
    let response = client
        .get(url)
        .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
        .send()
        .map_err(|e| IngestError::unavailable(name, url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::unavailable(
            name,
            url,
            format!("download failed with status {status}"),
        ));
    }

    let bytes = response
        .bytes()
        .map_err(|e| IngestError::unavailable(name, url, e.to_string()))?;
    tracing::debug!(source = %name, bytes = bytes.len(), "download complete");
    Ok(bytes.to_vec())
}

fn read_local(name: SourceKind, location: &str) -> Result<Vec<u8>> {
    let path = Path::new(location);
    std::fs::read(path).map_err(|e| {
        let reason = if e.kind() == std::io::ErrorKind::NotFound {
            "file not found".to_string()
        } else {
            e.to_string()
        };
        IngestError::unavailable(name, location, reason)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://www.census.gov/naics/file.xlsx"));
        assert!(is_remote("HTTP://example.org/a.csv"));
        assert!(!is_remote("/data/naics/codes.xlsx"));
        assert!(!is_remote("codes.csv"));
    }

    #[test]
    fn missing_local_file_is_unavailable() {
        let err = fetch_bytes(SourceKind::Codes, "/definitely/not/here.xlsx").unwrap_err();
        assert!(matches!(
            err,
            IngestError::SourceUnavailable {
                name: SourceKind::Codes,
                ..
            }
        ));
        assert!(err.to_string().contains("file not found"));
    }
}
