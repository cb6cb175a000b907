//! Description Segmenter.
//!
//! Splits each code's narrative cells into numbered blocks, drops structural
//! boilerplate, and runs the text cleanup chain on what survives.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use naics_model::{DescriptionBlock, normalize_range_codes_in_text};

use crate::group::group_by_code;
use crate::tables::CodeValueRow;

/// Sector heading line carried by every 2-digit description.
pub const SECTOR_HEADING: &str = "The Sector as a Whole";
/// Lines containing this introduce the cross-reference section.
pub const CROSS_REFERENCES_MARKER: &str = "Cross-References.";
/// Lines containing this introduce the illustrative examples list.
pub const EXAMPLES_MARKER: &str = "Illustrative Examples:";

static SEE_INDUSTRY_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"See industry description for \d{6}\.")
        .expect("Invalid see-industry regex pattern")
});

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("Invalid markup tag regex pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("Invalid whitespace regex pattern"));

/// Output of segmentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    /// Every code present in the descriptions source, in first-appearance order.
    pub codes: Vec<String>,
    /// Surviving blocks, grouped by code, `block_id` ascending within a code.
    pub blocks: Vec<DescriptionBlock>,
    /// `block_id` of the first block containing [`EXAMPLES_MARKER`], per code.
    pub example_markers: BTreeMap<String, u32>,
}

/// Segment the raw descriptions table.
///
/// Rows for the same code are concatenated in source order before numbering.
/// Block ids are assigned after boilerplate removal, starting at 1. A block
/// that cleans to nothing keeps its id with a `None` text. The examples marker
/// is located on the uncleaned text.
pub fn segment_descriptions(rows: &[CodeValueRow]) -> Segmented {
    let groups = group_by_code(
        rows.iter()
            .map(|row| (row.code.clone(), row.value.as_deref())),
    );

    let mut segmented = Segmented::default();
    for (code, cells) in groups {
        let mut block_id = 0u32;
        for line in cells.into_iter().flatten().flat_map(split_lines) {
            if is_boilerplate(line) {
                continue;
            }
            block_id += 1;
            if line.contains(EXAMPLES_MARKER) {
                segmented
                    .example_markers
                    .entry(code.clone())
                    .or_insert(block_id);
            }
            segmented
                .blocks
                .push(DescriptionBlock::new(code.as_str(), block_id, clean_block(line)));
        }
        segmented.codes.push(code);
    }
    segmented
}

/// Split a cell on line breaks, dropping pieces that are empty after trimming.
fn split_lines(cell: &str) -> impl Iterator<Item = &str> {
    cell.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
}

fn is_boilerplate(line: &str) -> bool {
    line.trim() == SECTOR_HEADING || line.contains(CROSS_REFERENCES_MARKER)
}

/// Run the cleanup chain on one block. Returns `None` if nothing is left.
///
/// ```
/// use naics_transform::segment::clean_block;
///
/// assert_eq!(
///     clean_block(" Sold in the U.S.;not elsewhere, e.g., retail.").as_deref(),
///     Some("Sold in the U.S.; not elsewhere, e.g., retail.")
/// );
/// assert_eq!(clean_block("See industry description for 111110."), None);
/// ```
pub fn clean_block(raw: &str) -> Option<String> {
    let text = raw.strip_prefix(' ').unwrap_or(raw);
    let text = text.strip_suffix(' ').unwrap_or(text);

    let text = text.replace("NULL", "");
    let text = SEE_INDUSTRY_DESCRIPTION.replace_all(&text, "");
    let text = MARKUP_TAG.replace_all(&text, "");
    let text = text
        .replace('\u{a0}', " ")
        .replace('.', ". ")
        .replace("U. S. ", "U.S.")
        .replace("e. g. ,", "e.g.,")
        .replace("i. e. ,", "i.e.,")
        .replace(';', "; ");
    let text = normalize_range_codes_in_text(&text);
    let text = WHITESPACE_RUN.replace_all(&text, " ");

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
