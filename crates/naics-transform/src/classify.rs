//! Block Classifier.
//!
//! Sorts each code's blocks into exclusion-marker, example-tail, and
//! narrative sets. A block after the examples marker is always in the tail,
//! and may also be the exclusion marker. Narrative holds what is neither.
//! The examples marker block itself belongs to no set.

use std::collections::{BTreeMap, HashMap};

use naics_model::{DescriptionBlock, ResolvedDescription};

use crate::group::group_by_code;

/// The three block categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub narrative: Vec<DescriptionBlock>,
    pub marker_exclusions: Vec<DescriptionBlock>,
    pub example_tail: Vec<DescriptionBlock>,
}

/// True when the block reads as an exclusion statement.
pub fn mentions_exclusion(block: &DescriptionBlock) -> bool {
    block.text_contains("Excluded") || block.text_contains("excluded")
}

/// Classify segmented blocks.
///
/// The last block of a code is an exclusion marker when its text mentions
/// "Excluded"/"excluded". Every block after the code's examples marker is in
/// the example tail, including a last block that is also an exclusion marker.
pub fn classify_blocks(
    blocks: Vec<DescriptionBlock>,
    example_markers: &BTreeMap<String, u32>,
) -> Classified {
    let mut last_ids: HashMap<String, u32> = HashMap::new();
    for block in &blocks {
        let last = last_ids.entry(block.code.clone()).or_default();
        *last = (*last).max(block.block_id);
    }

    let mut classified = Classified::default();
    for block in blocks {
        let is_last = last_ids.get(&block.code) == Some(&block.block_id);
        let marker = example_markers.get(&block.code).copied();

        let is_exclusion = is_last && mentions_exclusion(&block);
        let in_tail = marker.is_some_and(|e| block.block_id > e);

        if is_exclusion {
            classified.marker_exclusions.push(block.clone());
        }
        if in_tail {
            classified.example_tail.push(block);
        } else if !is_exclusion && marker != Some(block.block_id) {
            classified.narrative.push(block);
        }
    }
    classified
}

/// Join each code's narrative text in `block_id` order.
///
/// Every code in `codes` gets an entry; a code with no non-null narrative
/// text gets an empty description.
pub fn narrative_descriptions(
    codes: &[String],
    narrative: &[DescriptionBlock],
) -> Vec<ResolvedDescription> {
    let mut sorted: Vec<&DescriptionBlock> = narrative.iter().collect();
    sorted.sort_by_key(|block| block.block_id);
    let joined: HashMap<String, String> = group_by_code(
        sorted
            .into_iter()
            .filter_map(|block| Some((block.code.clone(), block.text.as_deref()?))),
    )
    .into_iter()
    .map(|(code, texts)| (code, texts.join(" ")))
    .collect();

    codes
        .iter()
        .map(|code| ResolvedDescription {
            code: code.clone(),
            description: joined.get(code).cloned().unwrap_or_default(),
        })
        .collect()
}
