//! Header normalization.

/// Trim a header and collapse internal whitespace runs to one space.
///
/// Source headers such as `2022 NAICS US   Code` carry irregular spacing;
/// declared and found headers are both passed through this before matching.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}
