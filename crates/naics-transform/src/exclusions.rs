//! Exclusion Resolver.
//!
//! Exclusions come from the cross-reference table and from description
//! blocks: the per-code exclusion marker, plus narrative blocks recovered by
//! the code-reference heuristic in [`recover_exclusion_references`].

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use naics_model::{DescriptionBlock, ResolvedExclusion};

use crate::group::group_by_code;
use crate::tables::CodeValueRow;

/// Codes whose narrative references are known false positives.
pub const RECOVERY_DENYLIST: [&str; 3] = ["525", "3152", "7132"];

static CODE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" (\d{2,6})").expect("Invalid code reference regex pattern"));

/// Decide whether a narrative block of `code` is an exclusion by reference.
///
/// Returns the referenced codes when the block qualifies:
///
/// 1. `code` is longer than 2 digits and not in [`RECOVERY_DENYLIST`];
/// 2. the text contains a space followed by 2-6 digits;
/// 3. at least one such digit run is a known code;
/// 4. a lone surviving reference must not be a substring of `code` itself.
///
/// ```
/// use std::collections::BTreeSet;
/// use naics_transform::exclusions::recover_exclusion_references;
///
/// let known: BTreeSet<String> = ["4246", "424690"].map(String::from).into();
/// let refs = recover_exclusion_references("325611", "soap wholesalers; see 424690.", &known);
/// assert_eq!(refs, Some(vec!["424690".to_string()]));
/// ```
pub fn recover_exclusion_references(
    code: &str,
    text: &str,
    known: &BTreeSet<String>,
) -> Option<Vec<String>> {
    if code.len() <= 2 || RECOVERY_DENYLIST.contains(&code) {
        return None;
    }

    let mut references: Vec<String> = Vec::new();
    for capture in CODE_REFERENCE.captures_iter(text) {
        let digits = &capture[1];
        if known.contains(digits) && !references.iter().any(|seen| seen == digits) {
            references.push(digits.to_string());
        }
    }

    match references.as_slice() {
        [] => None,
        [only] if code.contains(only.as_str()) => None,
        _ => Some(references),
    }
}

/// Split narrative blocks into those kept as narrative and those recovered
/// as exclusions.
///
/// Codes that already have an exclusion-marker block are not scanned.
pub fn recover_exclusions(
    narrative: Vec<DescriptionBlock>,
    marker_codes: &BTreeSet<String>,
    known: &BTreeSet<String>,
) -> (Vec<DescriptionBlock>, Vec<DescriptionBlock>) {
    narrative.into_iter().partition(|block| {
        marker_codes.contains(&block.code)
            || block.text.as_deref().is_none_or(|text| {
                recover_exclusion_references(&block.code, text, known).is_none()
            })
    })
}

/// Final exclusions with per-source group counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionResolution {
    pub exclusions: Vec<ResolvedExclusion>,
    /// Codes with explicit cross-reference text.
    pub explicit_groups: usize,
    /// Codes with marker or recovered exclusion blocks.
    pub block_groups: usize,
    /// Codes present in both.
    pub conflicts: usize,
}

/// Union explicit cross-references with exclusion blocks, one row per code.
///
/// Each source is space-joined per code. A code present in both gets the
/// explicit text first, then the block text.
pub fn resolve_exclusions(
    cross_references: &[CodeValueRow],
    blocks: &[DescriptionBlock],
) -> ExclusionResolution {
    let explicit = group_by_code(
        cross_references
            .iter()
            .filter_map(|row| Some((row.code.clone(), row.value.as_deref()?))),
    );

    let mut sorted: Vec<&DescriptionBlock> = blocks.iter().collect();
    sorted.sort_by_key(|block| block.block_id);
    let from_blocks = group_by_code(
        sorted
            .into_iter()
            .filter_map(|block| Some((block.code.clone(), block.text.as_deref()?))),
    );

    let mut resolution = ExclusionResolution {
        explicit_groups: explicit.len(),
        block_groups: from_blocks.len(),
        ..ExclusionResolution::default()
    };

    let mut block_text: HashMap<String, String> = from_blocks
        .into_iter()
        .map(|(code, texts)| (code, texts.join(" ")))
        .collect();
    let mut block_order: Vec<String> = Vec::new();
    for block in blocks {
        if block_text.contains_key(&block.code) && !block_order.contains(&block.code) {
            block_order.push(block.code.clone());
        }
    }

    for (code, texts) in explicit {
        let mut excluded = texts.join(" ");
        if let Some(extra) = block_text.remove(&code) {
            debug!(code = %code, "code has explicit and recovered exclusions");
            resolution.conflicts += 1;
            excluded.push(' ');
            excluded.push_str(&extra);
        }
        resolution.exclusions.push(ResolvedExclusion { code, excluded });
    }
    for code in block_order {
        if let Some(excluded) = block_text.remove(&code) {
            resolution.exclusions.push(ResolvedExclusion { code, excluded });
        }
    }
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|code| (*code).to_string()).collect()
    }

    fn block(code: &str, id: u32, text: &str) -> DescriptionBlock {
        DescriptionBlock::new(code, id, Some(text.to_string()))
    }

    #[test]
    fn recovers_single_known_reference() {
        let text = "Excluded from this industry are establishments primarily engaged in selling soap; see 424690.";
        let refs = recover_exclusion_references("325611", text, &known(&["424690", "325611"]));
        assert_eq!(refs, Some(vec!["424690".to_string()]));
    }

    #[test]
    fn unknown_reference_is_ignored() {
        let text = "Excluded from this industry are establishments primarily engaged in selling soap; see 424690.";
        assert_eq!(recover_exclusion_references("325611", text, &known(&["325611"])), None);
    }

    #[test]
    fn lone_reference_contained_in_own_code_is_discarded() {
        let known = known(&["3111", "311111"]);
        assert_eq!(
            recover_exclusion_references("311111", "Part of industry group 3111 as well.", &known),
            None
        );
        assert_eq!(
            recover_exclusion_references("311111", "Same as 311111 above.", &known),
            None
        );
    }

    #[test]
    fn several_references_are_always_kept() {
        let known = known(&["3111", "424690"]);
        let refs = recover_exclusion_references("311111", "See 3111 and 424690.", &known);
        assert_eq!(refs, Some(vec!["3111".to_string(), "424690".to_string()]));
    }

    #[test]
    fn repeated_reference_counts_once() {
        let known = known(&["3111"]);
        assert_eq!(
            recover_exclusion_references("311111", "Group 3111 and again 3111.", &known),
            None
        );
    }

    #[test]
    fn sectors_and_denylisted_codes_never_recover() {
        let known = known(&["424690"]);
        let text = "selling soap; see 424690.";
        assert_eq!(recover_exclusion_references("31", text, &known), None);
        for code in RECOVERY_DENYLIST {
            assert_eq!(recover_exclusion_references(code, text, &known), None);
        }
    }

    #[test]
    fn reference_must_follow_a_space() {
        let known = known(&["424690"]);
        assert_eq!(recover_exclusion_references("3256", "see(424690)", &known), None);
    }

    #[test]
    fn longer_digit_run_yields_its_first_six_digits() {
        let known = known(&["424690"]);
        assert_eq!(
            recover_exclusion_references("325611", "see 4246901 for details", &known),
            Some(vec!["424690".to_string()])
        );
    }

    #[test]
    fn codes_with_a_marker_are_not_scanned() {
        let narrative = vec![
            block("3256", 1, "Soap makers; see 424690."),
            block("3261", 1, "Plastics; see 424690."),
        ];
        let (kept, recovered) =
            recover_exclusions(narrative, &known(&["3256"]), &known(&["424690"]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].code, "3256");
        assert_eq!(recovered.len(), 1);
        assert_eq!(recovered[0].code, "3261");
    }

    #[test]
    fn explicit_and_block_exclusions_merge_per_code() {
        let cross = vec![
            CodeValueRow {
                code: "111".to_string(),
                value: Some("Tree farms--113110.".to_string()),
            },
            CodeValueRow {
                code: "111".to_string(),
                value: Some("Logging--113310.".to_string()),
            },
            CodeValueRow {
                code: "112".to_string(),
                value: None,
            },
        ];
        let blocks = vec![
            block("211", 2, "Excluded are refineries."),
            block("111", 4, "Excluded are nurseries."),
            block("211", 1, "See 324110 and 486110."),
        ];
        let resolution = resolve_exclusions(&cross, &blocks);

        assert_eq!(resolution.explicit_groups, 1);
        assert_eq!(resolution.block_groups, 2);
        assert_eq!(resolution.conflicts, 1);
        assert_eq!(
            resolution.exclusions,
            vec![
                ResolvedExclusion {
                    code: "111".to_string(),
                    excluded: "Tree farms--113110. Logging--113310. Excluded are nurseries."
                        .to_string(),
                },
                ResolvedExclusion {
                    code: "211".to_string(),
                    excluded: "See 324110 and 486110. Excluded are refineries.".to_string(),
                },
            ]
        );
    }
}
