//! Tests for naics-model types.

use naics_model::{
    CodeRecord, FinalRecord, Level, ModelError, NaicsCode, RANGE_CODES, normalize_code,
};
use proptest::prelude::{Just, prop_assert, prop_assert_eq, prop_oneof, proptest};

proptest! {
    #[test]
    fn level_always_equals_code_length(raw in "[0-9]{2,6}") {
        let code = NaicsCode::new(&raw).unwrap();
        prop_assert_eq!(usize::from(code.level().get()), code.as_str().len());
    }

    #[test]
    fn normalization_is_idempotent(raw in "[0-9-]{0,7}") {
        let once = normalize_code(&raw);
        prop_assert_eq!(normalize_code(&once), once);
    }

    #[test]
    fn range_codes_never_survive(
        raw in prop_oneof![Just("31-33"), Just("44-45"), Just("48-49")],
        padding in " {0,2}",
    ) {
        let code = NaicsCode::new(format!("{padding}{raw}{padding}")).unwrap();
        prop_assert!(!code.as_str().contains('-'));
        prop_assert_eq!(code.level(), Level::SECTOR);
    }
}

#[test]
fn every_range_code_has_a_sector_member() {
    for (range, first) in RANGE_CODES {
        assert!(range.starts_with(first));
        assert_eq!(NaicsCode::new(range).unwrap().as_str(), first);
    }
}

#[test]
fn final_record_serializes_codes_as_strings() {
    let record = CodeRecord::from_source_row(3, "511210", "Software Publishers").unwrap();
    let mut row = FinalRecord::from_code_record(&record);
    row.examples = Some(vec!["Mobile app publishers".to_string()]);

    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["code"], "511210");
    assert_eq!(json["level"], 6);
    assert_eq!(json["sequence_index"], 2);
    assert!(json["description"].is_null());
    assert_eq!(json["examples"][0], "Mobile app publishers");

    let back: FinalRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, row);
}

#[test]
fn deserializing_rejects_invalid_codes() {
    let json = serde_json::json!({
        "sequence_index": 0,
        "level": 2,
        "code": "31-3",
        "title": "Broken",
        "description": null,
        "excluded": null,
        "examples": null
    });
    assert!(serde_json::from_value::<FinalRecord>(json).is_err());
}

#[test]
fn model_error_messages() {
    assert_eq!(
        ModelError::InvalidCode("x".to_string()).to_string(),
        "invalid NAICS code 'x': expected 2-6 digits after normalization"
    );
    assert_eq!(
        ModelError::DuplicateSequence(4).to_string(),
        "duplicate sequence index 4"
    );
}
