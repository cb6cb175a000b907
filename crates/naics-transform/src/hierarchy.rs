//! Hierarchical Description Filler.
//!
//! Level-5 and level-4 codes with no narrative of their own borrow the text
//! of a described child. The completed pool is one map from code to
//! description, probed per missing code with a fixed list of child suffixes.

use std::collections::HashMap;

use naics_model::{Level, ResolvedDescription};

/// Suffix turning a level-5 code into its national-industry twin.
pub const LEVEL5_CHILD_SUFFIX: char = '0';

/// Child suffixes tried, in order, for a level-4 code.
pub const LEVEL4_CHILD_SUFFIXES: [char; 5] = ['1', '2', '3', '4', '9'];

/// Filled descriptions and fill counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilledDescriptions {
    /// Non-empty originals, then inherited level-5, then inherited level-4.
    pub descriptions: Vec<ResolvedDescription>,
    /// Codes with a non-empty narrative of their own.
    pub complete: usize,
    pub missing_level5: usize,
    pub filled_level5: usize,
    pub missing_level4: usize,
    pub filled_level4: usize,
}

/// Rewrite a national-industry description for its level-5 parent.
pub fn rewrite_for_industry(text: &str) -> String {
    text.replacen("This industry", "This NAICS industry", 1)
}

/// Rewrite an industry description for its level-4 parent.
pub fn rewrite_for_industry_group(text: &str) -> String {
    text.replacen("This industry", "This industry group", 1)
        .replacen("This NAICS industry", "This industry group", 1)
}

/// Fill missing level-5 and level-4 descriptions from their children.
///
/// Levels 2, 3 and 6 are never inferred. Empty descriptions are dropped from
/// the result, so a code without text ends up with no entry at all.
pub fn fill_descriptions(raw: &[ResolvedDescription]) -> FilledDescriptions {
    let mut filled = FilledDescriptions::default();
    let mut pool: HashMap<&str, &str> = HashMap::new();
    let mut missing5: Vec<&str> = Vec::new();
    let mut missing4: Vec<&str> = Vec::new();

    for entry in raw {
        if !entry.description.is_empty() {
            pool.insert(entry.code.as_str(), entry.description.as_str());
            filled.descriptions.push(entry.clone());
            continue;
        }
        match entry.code.len() {
            len if len == usize::from(Level::INDUSTRY.get()) => missing5.push(&entry.code),
            len if len == usize::from(Level::INDUSTRY_GROUP.get()) => missing4.push(&entry.code),
            _ => {}
        }
    }
    filled.complete = filled.descriptions.len();
    filled.missing_level5 = missing5.len();
    filled.missing_level4 = missing4.len();

    let mut inherited5: Vec<ResolvedDescription> = Vec::new();
    for code in missing5 {
        let child = format!("{code}{LEVEL5_CHILD_SUFFIX}");
        if let Some(text) = pool.get(child.as_str()) {
            inherited5.push(ResolvedDescription {
                code: code.to_string(),
                description: rewrite_for_industry(text),
            });
        }
    }
    filled.filled_level5 = inherited5.len();

    for entry in &inherited5 {
        pool.insert(entry.code.as_str(), entry.description.as_str());
    }

    let mut inherited4: Vec<ResolvedDescription> = Vec::new();
    for code in missing4 {
        let found = LEVEL4_CHILD_SUFFIXES.iter().find_map(|suffix| {
            let child = format!("{code}{suffix}");
            pool.get(child.as_str()).copied()
        });
        if let Some(text) = found {
            inherited4.push(ResolvedDescription {
                code: code.to_string(),
                description: rewrite_for_industry_group(text),
            });
        }
    }
    filled.filled_level4 = inherited4.len();

    filled.descriptions.extend(inherited5);
    filled.descriptions.extend(inherited4);
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(code: &str, text: &str) -> ResolvedDescription {
        ResolvedDescription {
            code: code.to_string(),
            description: text.to_string(),
        }
    }

    fn lookup<'a>(filled: &'a FilledDescriptions, code: &str) -> Option<&'a str> {
        filled
            .descriptions
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.description.as_str())
    }

    #[test]
    fn level5_copies_its_zero_suffixed_child() {
        let filled = fill_descriptions(&[
            desc("11111", ""),
            desc("111110", "This industry comprises soybean farming."),
        ]);
        assert_eq!(
            lookup(&filled, "11111"),
            Some("This NAICS industry comprises soybean farming.")
        );
        assert_eq!(filled.missing_level5, 1);
        assert_eq!(filled.filled_level5, 1);
    }

    #[test]
    fn level4_chains_through_inherited_level5() {
        let filled = fill_descriptions(&[
            desc("1111", ""),
            desc("11111", ""),
            desc("111110", "This industry comprises soybean farming."),
        ]);
        assert_eq!(
            lookup(&filled, "1111"),
            Some("This industry group comprises soybean farming.")
        );
        assert_eq!(filled.filled_level4, 1);
    }

    #[test]
    fn level4_takes_the_first_suffix_that_matches() {
        let filled = fill_descriptions(&[
            desc("3152", ""),
            desc("31529", "This industry comprises other apparel."),
            desc("31521", "This industry comprises cut and sew contractors."),
        ]);
        assert_eq!(
            lookup(&filled, "3152"),
            Some("This industry group comprises cut and sew contractors.")
        );
    }

    #[test]
    fn suffixes_outside_the_list_are_not_probed() {
        let filled = fill_descriptions(&[desc("3152", ""), desc("31525", "This industry.")]);
        assert_eq!(lookup(&filled, "3152"), None);
        assert_eq!(filled.missing_level4, 1);
        assert_eq!(filled.filled_level4, 0);
    }

    #[test]
    fn other_levels_are_never_inferred() {
        let filled = fill_descriptions(&[
            desc("11", ""),
            desc("111", ""),
            desc("111110", ""),
            desc("1111", "This industry group grows things."),
        ]);
        assert_eq!(lookup(&filled, "11"), None);
        assert_eq!(lookup(&filled, "111"), None);
        assert_eq!(lookup(&filled, "111110"), None);
        assert_eq!(filled.descriptions.len(), 1);
        assert_eq!(filled.complete, 1);
    }

    #[test]
    fn rewrites_replace_first_occurrence_only() {
        assert_eq!(
            rewrite_for_industry("This industry makes X. This industry also Y."),
            "This NAICS industry makes X. This industry also Y."
        );
        assert_eq!(
            rewrite_for_industry_group("This NAICS industry makes X."),
            "This industry group makes X."
        );
    }
}
