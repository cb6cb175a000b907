//! Example Resolver.

use std::collections::HashMap;

use naics_model::{DescriptionBlock, ResolvedExample};

use crate::group::group_by_code;
use crate::tables::CodeValueRow;

/// Final examples with per-source group counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleResolution {
    pub examples: Vec<ResolvedExample>,
    pub index_groups: usize,
    pub narrative_groups: usize,
}

/// Merge index-file items with narrative example tails.
///
/// Both sources are grouped per code into ordered lists, skipping nulls. When
/// a code has both, the narrative list wins outright; lists are not merged.
/// Codes appear in index order, followed by narrative-only codes.
pub fn resolve_examples(index: &[CodeValueRow], tail: &[DescriptionBlock]) -> ExampleResolution {
    let from_index = group_by_code(
        index
            .iter()
            .filter_map(|row| Some((row.code.clone(), row.value.clone()?))),
    );

    let mut sorted: Vec<&DescriptionBlock> = tail.iter().collect();
    sorted.sort_by_key(|block| block.block_id);
    let from_narrative = group_by_code(
        sorted
            .into_iter()
            .filter_map(|block| Some((block.code.clone(), block.text.clone()?))),
    );

    let index_groups = from_index.len();
    let narrative_groups = from_narrative.len();

    let mut narrative_order: Vec<String> = Vec::with_capacity(narrative_groups);
    let mut narrative: HashMap<String, Vec<String>> = HashMap::with_capacity(narrative_groups);
    for (code, items) in from_narrative {
        narrative_order.push(code.clone());
        narrative.insert(code, items);
    }

    let mut examples: Vec<ResolvedExample> = from_index
        .into_iter()
        .map(|(code, items)| {
            let items = narrative.remove(&code).unwrap_or(items);
            ResolvedExample {
                code,
                examples: Some(items),
            }
        })
        .collect();
    for code in narrative_order {
        if let Some(items) = narrative.remove(&code) {
            examples.push(ResolvedExample {
                code,
                examples: Some(items),
            });
        }
    }

    ExampleResolution {
        examples,
        index_groups,
        narrative_groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_row(code: &str, item: Option<&str>) -> CodeValueRow {
        CodeValueRow {
            code: code.to_string(),
            value: item.map(str::to_string),
        }
    }

    fn tail_block(code: &str, id: u32, text: Option<&str>) -> DescriptionBlock {
        DescriptionBlock::new(code, id, text.map(str::to_string))
    }

    fn examples_for<'a>(resolution: &'a ExampleResolution, code: &str) -> Option<&'a [String]> {
        resolution
            .examples
            .iter()
            .find(|example| example.code == code)
            .and_then(|example| example.examples.as_deref())
    }

    #[test]
    fn narrative_tail_wins_over_index() {
        let index = vec![index_row("511210", Some("Video game publishers"))];
        let tail = vec![tail_block("511210", 3, Some("Mobile app publishers"))];
        let resolution = resolve_examples(&index, &tail);
        assert_eq!(
            examples_for(&resolution, "511210"),
            Some(&["Mobile app publishers".to_string()][..])
        );
        assert_eq!(resolution.examples.len(), 1);
    }

    #[test]
    fn index_fills_codes_without_a_tail() {
        let index = vec![
            index_row("111110", Some("Soybean farming")),
            index_row("111120", None),
            index_row("111110", Some("Soybeans, growing")),
        ];
        let tail = vec![
            tail_block("211120", 5, Some("Oil sands")),
            tail_block("211120", 4, Some("Crude petroleum")),
            tail_block("211120", 6, None),
        ];
        let resolution = resolve_examples(&index, &tail);

        assert_eq!(resolution.index_groups, 1);
        assert_eq!(resolution.narrative_groups, 1);
        assert_eq!(
            examples_for(&resolution, "111110"),
            Some(&["Soybean farming".to_string(), "Soybeans, growing".to_string()][..])
        );
        assert_eq!(
            examples_for(&resolution, "211120"),
            Some(&["Crude petroleum".to_string(), "Oil sands".to_string()][..])
        );
        assert_eq!(examples_for(&resolution, "111120"), None);
    }
}
