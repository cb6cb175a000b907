//! NAICS code identifiers and the combined-range normalizer.
//!
//! The Census Bureau sources label three sectors with a combined range
//! ("31-33" Manufacturing, "44-45" Retail Trade, "48-49" Transportation and
//! Warehousing). Every code column is mapped to the first member of the range
//! before any join or length-based branching, so that a code's character
//! length is always its hierarchy level.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Combined-range identifiers and the canonical code each one maps to.
pub const RANGE_CODES: [(&str, &str); 3] = [("31-33", "31"), ("44-45", "44"), ("48-49", "48")];

/// Canonicalize a raw code value.
///
/// Trims surrounding whitespace and maps a combined-range identifier to its
/// first member. All other values pass through unchanged.
///
/// ```
/// use naics_model::normalize_code;
///
/// assert_eq!(normalize_code("31-33"), "31");
/// assert_eq!(normalize_code(" 511210 "), "511210");
/// assert_eq!(normalize_code("32"), "32");
/// ```
pub fn normalize_code(raw: &str) -> String {
    let trimmed = raw.trim();
    RANGE_CODES
        .iter()
        .find(|(range, _)| *range == trimmed)
        .map_or_else(|| trimmed.to_string(), |(_, first)| (*first).to_string())
}

/// Replace every combined-range identifier inside free text.
pub fn normalize_range_codes_in_text(text: &str) -> String {
    let mut out = text.to_string();
    for (range, first) in RANGE_CODES {
        if out.contains(range) {
            out = out.replace(range, first);
        }
    }
    out
}

/// Hierarchy depth of a code: 2 = sector, 3 = subsector, 4 = industry group,
/// 5 = NAICS industry, 6 = national industry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const SECTOR: Level = Level(2);
    pub const SUBSECTOR: Level = Level(3);
    pub const INDUSTRY_GROUP: Level = Level(4);
    pub const INDUSTRY: Level = Level(5);
    pub const NATIONAL_INDUSTRY: Level = Level(6);

    pub fn new(value: u8) -> Result<Self> {
        if (2..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidLevel(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Level {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized 2-6 digit classification code.
///
/// Codes are opaque digit strings, never numbers.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct NaicsCode(String);

impl NaicsCode {
    /// Normalize and validate a raw code.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref();
        let normalized = normalize_code(raw);
        let valid_len = (2..=6).contains(&normalized.len());
        if !valid_len || !normalized.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModelError::InvalidCode(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Level derived from the normalized code length.
    pub fn level(&self) -> Level {
        // Length is validated to 2..=6 in `new`.
        Level(self.0.len() as u8)
    }
}

impl TryFrom<String> for NaicsCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NaicsCode> for String {
    fn from(code: NaicsCode) -> Self {
        code.0
    }
}

impl AsRef<str> for NaicsCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NaicsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_codes_map_to_first_member() {
        assert_eq!(normalize_code("31-33"), "31");
        assert_eq!(normalize_code("44-45"), "44");
        assert_eq!(normalize_code("48-49"), "48");
    }

    #[test]
    fn other_values_pass_through() {
        assert_eq!(normalize_code("32"), "32");
        assert_eq!(normalize_code("31-32"), "31-32");
        assert_eq!(normalize_code(""), "");
    }

    #[test]
    fn text_normalization_rewrites_every_range() {
        assert_eq!(
            normalize_range_codes_in_text("Sectors 31-33 and 44-45 and 48-49."),
            "Sectors 31 and 44 and 48."
        );
    }

    #[test]
    fn code_rejects_non_digits_and_bad_lengths() {
        assert!(NaicsCode::new("31-32").is_err());
        assert!(NaicsCode::new("1").is_err());
        assert!(NaicsCode::new("1234567").is_err());
        assert!(NaicsCode::new("").is_err());
        assert!(NaicsCode::new("51121A").is_err());
    }

    #[test]
    fn code_level_follows_length() {
        let code = NaicsCode::new("48-49").unwrap();
        assert_eq!(code.as_str(), "48");
        assert_eq!(code.level(), Level::SECTOR);
        assert_eq!(NaicsCode::new("511210").unwrap().level().get(), 6);
    }

    #[test]
    fn level_bounds() {
        assert!(Level::new(1).is_err());
        assert!(Level::new(7).is_err());
        assert_eq!(Level::new(4).unwrap(), Level::INDUSTRY_GROUP);
    }
}
