//! Assembler: left-join resolved tables onto the titles.

use std::collections::HashMap;

use naics_model::{CodeRecord, FinalRecord, ResolvedDescription, ResolvedExample, ResolvedExclusion};

/// Build one [`FinalRecord`] per titles row, sorted by `sequence_index`.
///
/// Titles drive the join: descriptions, exclusions and examples for codes
/// absent from the titles are dropped, and unmatched fields stay `None`.
pub fn assemble(
    titles: &[CodeRecord],
    descriptions: &[ResolvedDescription],
    exclusions: &[ResolvedExclusion],
    examples: &[ResolvedExample],
) -> Vec<FinalRecord> {
    let descriptions: HashMap<&str, &str> = descriptions
        .iter()
        .filter(|entry| !entry.description.is_empty())
        .map(|entry| (entry.code.as_str(), entry.description.as_str()))
        .collect();
    let exclusions: HashMap<&str, &str> = exclusions
        .iter()
        .map(|entry| (entry.code.as_str(), entry.excluded.as_str()))
        .collect();
    let examples: HashMap<&str, &Vec<String>> = examples
        .iter()
        .filter_map(|entry| Some((entry.code.as_str(), entry.examples.as_ref()?)))
        .collect();

    let mut records: Vec<FinalRecord> = titles
        .iter()
        .map(|title| {
            let code = title.code.as_str();
            let mut record = FinalRecord::from_code_record(title);
            record.description = descriptions.get(code).map(|text| (*text).to_string());
            record.excluded = exclusions.get(code).map(|text| (*text).to_string());
            record.examples = examples.get(code).map(|items| (*items).clone());
            record
        })
        .collect();
    records.sort_by_key(|record| record.sequence_index);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use naics_model::NaicsCode;

    fn title(seq: u32, code: &str, name: &str) -> CodeRecord {
        CodeRecord::new(seq, NaicsCode::new(code).unwrap(), name)
    }

    #[test]
    fn joins_on_code_and_sorts_by_sequence() {
        let titles = vec![title(1, "111", "Crop Production"), title(0, "11", "Agriculture")];
        let descriptions = vec![
            ResolvedDescription {
                code: "111".to_string(),
                description: "Grows crops.".to_string(),
            },
            ResolvedDescription {
                code: "999".to_string(),
                description: "Orphan.".to_string(),
            },
        ];
        let exclusions = vec![ResolvedExclusion {
            code: "11".to_string(),
            excluded: "Logging.".to_string(),
        }];
        let examples = vec![ResolvedExample {
            code: "111".to_string(),
            examples: Some(vec!["Soybean farming".to_string()]),
        }];

        let records = assemble(&titles, &descriptions, &exclusions, &examples);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code.as_str(), "11");
        assert_eq!(records[0].description, None);
        assert_eq!(records[0].excluded.as_deref(), Some("Logging."));
        assert_eq!(records[1].description.as_deref(), Some("Grows crops."));
        assert_eq!(
            records[1].examples,
            Some(vec!["Soybean farming".to_string()])
        );
        assert_eq!(records[1].excluded, None);
    }
}
