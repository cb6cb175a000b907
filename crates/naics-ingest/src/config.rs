//! Source configuration: where each raw table lives and what it must contain.
//!
//! Defaults reproduce the 2022 NAICS workbooks published by the U.S. Census
//! Bureau. A TOML file with the same shape can replace them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Canonical column names shared by the loader and the transform stages.
pub mod fields {
    pub const INDEX: &str = "index";
    pub const CODE: &str = "code";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const EXAMPLES: &str = "examples_1";
    pub const EXCLUDED: &str = "excluded";
}

/// The four raw tables feeding the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Codes and titles (the driving table).
    Codes,
    /// Index items, one illustrative example per row.
    Index,
    /// Multi-line narrative descriptions.
    Descriptions,
    /// Cross-reference exclusions.
    CrossReferences,
}

impl SourceKind {
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Codes,
        SourceKind::Index,
        SourceKind::Descriptions,
        SourceKind::CrossReferences,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Codes => "codes",
            Self::Index => "index",
            Self::Descriptions => "descriptions",
            Self::CrossReferences => "cross_references",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SourceKind {
    type Err = IngestError;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == normalized)
            .ok_or_else(|| {
                IngestError::config(format!(
                    "unknown source '{value}' (expected codes, index, descriptions, cross_references)"
                ))
            })
    }
}

/// Semantic type enforced on a loaded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Opaque string; numeric cells are rendered as digit strings.
    #[default]
    Text,
    /// Unsigned 32-bit integer.
    Uint32,
}

/// One declared column: its header in the source, its canonical name, its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub source: String,
    pub rename: String,
    #[serde(default)]
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn new(source: impl Into<String>, rename: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            source: source.into(),
            rename: rename.into(),
            kind,
        }
    }

    pub fn text(source: impl Into<String>, rename: impl Into<String>) -> Self {
        Self::new(source, rename, ColumnKind::Text)
    }
}

/// Location, sheet selector, and column schema of one raw table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    /// `http(s)://` URL or local filesystem path.
    pub location: String,
    /// Worksheet name; ignored for CSV sources.
    pub sheet: String,
    /// Declared columns, in output order.
    pub columns: Vec<ColumnSpec>,
}

/// Configuration for all four sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    pub codes: SourceSpec,
    pub index: SourceSpec,
    pub descriptions: SourceSpec,
    pub cross_references: SourceSpec,
}

const CENSUS_BASE_URL: &str = "https://www.census.gov/naics/2022NAICS";

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            codes: SourceSpec {
                location: format!("{CENSUS_BASE_URL}/2-6%20digit_2022_Codes.xlsx"),
                sheet: "tbl_2022_title_description_coun".to_string(),
                columns: vec![
                    ColumnSpec::new("Seq. No.", fields::INDEX, ColumnKind::Uint32),
                    ColumnSpec::text("2022 NAICS US   Code", fields::CODE),
                    ColumnSpec::text("2022 NAICS US Title", fields::TITLE),
                ],
            },
            index: SourceSpec {
                location: format!("{CENSUS_BASE_URL}/2022_NAICS_Index_File.xlsx"),
                sheet: "2022NAICS".to_string(),
                columns: vec![
                    ColumnSpec::text("NAICS22", fields::CODE),
                    ColumnSpec::text("INDEX ITEM DESCRIPTION", fields::EXAMPLES),
                ],
            },
            descriptions: SourceSpec {
                location: format!("{CENSUS_BASE_URL}/2022_NAICS_Descriptions.xlsx"),
                sheet: "2022_NAICS_Descriptions".to_string(),
                columns: vec![
                    ColumnSpec::text("Code", fields::CODE),
                    ColumnSpec::text("Description", fields::DESCRIPTION),
                ],
            },
            cross_references: SourceSpec {
                location: format!("{CENSUS_BASE_URL}/2022_NAICS_Cross_References.xlsx"),
                sheet: "2022_NAICS_Cross_References".to_string(),
                columns: vec![
                    ColumnSpec::text("Code", fields::CODE),
                    ColumnSpec::text("Cross-Reference", fields::EXCLUDED),
                ],
            },
        }
    }
}

impl SourcesConfig {
    /// Load a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IngestError::config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
            .map_err(|e| IngestError::config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| IngestError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| IngestError::config(e.to_string()))
    }

    pub fn spec(&self, kind: SourceKind) -> &SourceSpec {
        match kind {
            SourceKind::Codes => &self.codes,
            SourceKind::Index => &self.index,
            SourceKind::Descriptions => &self.descriptions,
            SourceKind::CrossReferences => &self.cross_references,
        }
    }

    pub fn spec_mut(&mut self, kind: SourceKind) -> &mut SourceSpec {
        match kind {
            SourceKind::Codes => &mut self.codes,
            SourceKind::Index => &mut self.index,
            SourceKind::Descriptions => &mut self.descriptions,
            SourceKind::CrossReferences => &mut self.cross_references,
        }
    }

    /// Check that every source declares the canonical columns the pipeline joins on.
    pub fn validate(&self) -> Result<()> {
        for kind in SourceKind::ALL {
            let spec = self.spec(kind);
            for required in required_fields(kind) {
                if !spec.columns.iter().any(|column| column.rename == *required) {
                    return Err(IngestError::config(format!(
                        "{kind} source must declare a column renamed to '{required}'"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Canonical columns each source must provide.
pub fn required_fields(kind: SourceKind) -> &'static [&'static str] {
    match kind {
        SourceKind::Codes => &[fields::INDEX, fields::CODE, fields::TITLE],
        SourceKind::Index => &[fields::CODE, fields::EXAMPLES],
        SourceKind::Descriptions => &[fields::CODE, fields::DESCRIPTION],
        SourceKind::CrossReferences => &[fields::CODE, fields::EXCLUDED],
    }
}
