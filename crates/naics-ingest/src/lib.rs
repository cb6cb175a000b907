//! NAICS source ingestion.
//!
//! Loads the four raw Census tables (codes, index, descriptions, cross
//! references) into Polars DataFrames with a fixed column schema.
//!
//! # Features
//!
//! - **Fetch**: HTTP(S) URLs or local paths
//! - **Decoding**: xlsx/xls/xlsb/ods workbooks via calamine, CSV via csv
//! - **Schema enforcement**: declared columns only, renamed and typed
//! - **Configuration**: TOML source table with the 2022 Census defaults
//!
//! # Example
//!
//! ```ignore
//! use naics_ingest::{SourcesConfig, load_sources};
//!
//! let sources = load_sources(&SourcesConfig::default())?;
//! println!("{} codes", sources.codes.height());
//! ```

pub mod config;
pub mod decode;
mod error;
mod fetch;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Configuration ===
pub use config::{
    ColumnKind, ColumnSpec, SourceKind, SourceSpec, SourcesConfig, fields, required_fields,
};

// === Fetch ===
pub use fetch::{fetch_bytes, is_remote};

// === Loading ===
pub use loader::{LoadedSources, SourceTable, load_source, load_sources, project_sheet};
