//! Read-only lookups over a written artifact.

use regex::Regex;

use naics_model::FinalRecord;

/// Rows printed when no limit is given.
pub const DEFAULT_LIMIT: usize = 100;

/// Conjunction of optional filters. An empty filter matches nothing.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    pub level: Option<u8>,
    pub code_prefix: Option<String>,
    pub search: Option<Regex>,
    pub limit: usize,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            level: None,
            code_prefix: None,
            search: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.code_prefix.as_deref().is_none_or(str::is_empty)
            && self.search.is_none()
    }

    pub fn matches(&self, record: &FinalRecord) -> bool {
        if self.level.is_some_and(|level| record.level.get() != level) {
            return false;
        }
        if let Some(prefix) = self.code_prefix.as_deref()
            && !record.code.as_str().starts_with(prefix)
        {
            return false;
        }
        match &self.search {
            Some(pattern) => search_fields(record).any(|text| pattern.is_match(&text)),
            None => true,
        }
    }
}

/// Title, description, joined examples and exclusions, skipping nulls.
fn search_fields(record: &FinalRecord) -> impl Iterator<Item = String> + '_ {
    let examples = record.examples.as_ref().map(|items| items.join("; "));
    [
        Some(record.title.clone()),
        record.description.clone(),
        examples,
        record.excluded.clone(),
    ]
    .into_iter()
    .flatten()
}

/// Records matching `filter`, in artifact order, at most `filter.limit`.
pub fn query_records<'a>(records: &'a [FinalRecord], filter: &RecordFilter) -> Vec<&'a FinalRecord> {
    if filter.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| filter.matches(record))
        .take(filter.limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use naics_model::NaicsCode;

    fn record(seq: u32, code: &str, title: &str) -> FinalRecord {
        let code = NaicsCode::new(code).unwrap();
        FinalRecord {
            sequence_index: seq,
            level: code.level(),
            code,
            title: title.to_string(),
            description: None,
            excluded: None,
            examples: None,
        }
    }

    fn records() -> Vec<FinalRecord> {
        let mut soybeans = record(2, "111110", "Soybean Farming");
        soybeans.examples = Some(vec!["Soybeans, growing".into()]);
        let mut oilseed = record(3, "111120", "Oilseed (except Soybean) Farming");
        oilseed.excluded = Some("Growing soybeans are classified in 111110.".into());
        vec![
            record(0, "11", "Agriculture, Forestry, Fishing and Hunting"),
            record(1, "111", "Crop Production"),
            soybeans,
            oilseed,
            record(4, "211120", "Crude Petroleum Extraction"),
        ]
    }

    fn codes(found: &[&FinalRecord]) -> Vec<String> {
        found.iter().map(|r| r.code.to_string()).collect()
    }

    #[test]
    fn empty_filter_returns_nothing() {
        assert!(query_records(&records(), &RecordFilter::default()).is_empty());
        let blank_prefix = RecordFilter {
            code_prefix: Some(String::new()),
            ..RecordFilter::default()
        };
        assert!(query_records(&records(), &blank_prefix).is_empty());
    }

    #[test]
    fn level_and_prefix_combine() {
        let filter = RecordFilter {
            level: Some(6),
            code_prefix: Some("11".into()),
            ..RecordFilter::default()
        };
        assert_eq!(codes(&query_records(&records(), &filter)), ["111110", "111120"]);
    }

    #[test]
    fn search_covers_examples_and_exclusions() {
        let filter = RecordFilter {
            search: Some(Regex::new("[Ss]oybeans").unwrap()),
            ..RecordFilter::default()
        };
        assert_eq!(codes(&query_records(&records(), &filter)), ["111110", "111120"]);
    }

    #[test]
    fn limit_caps_results() {
        let filter = RecordFilter {
            code_prefix: Some("1".into()),
            limit: 2,
            ..RecordFilter::default()
        };
        assert_eq!(codes(&query_records(&records(), &filter)), ["11", "111"]);
    }
}
