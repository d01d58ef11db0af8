//! Table category detection from column names.
//!
//! Each [`CategoryRule`] is scored against the lower-cased column names:
//!
//! | hit                                          | weight |
//! |----------------------------------------------|--------|
//! | keyword in the joined column names           | 2      |
//! | keyword in a single column name only         | 1      |
//! | coordinate pattern                           | 3      |
//!
//! The best positive score wins; ties go to the rule listed first.

use crate::config::CategoryRule;
use crate::model::DataFrame;
use std::collections::BTreeSet;

/// Weight of a keyword found in the joined column names.
pub const EXACT_KEYWORD_WEIGHT: u32 = 2;
/// Weight of a keyword found in one column name but not the joined names.
pub const PARTIAL_KEYWORD_WEIGHT: u32 = 1;
/// Weight of a coordinate pattern hit.
pub const COORDINATE_WEIGHT: u32 = 3;

/// Detected category and the columns worth highlighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Winning category (or the default category)
    pub category: String,
    /// Columns to highlight, in table order: keyword and coordinate hits
    /// plus columns matching the winning rule's highlight patterns
    pub highlight_columns: Vec<String>,
    /// Score of the winning rule (0 for the default category)
    pub score: u32,
}

/// Score of one rule against a set of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleScore {
    /// Weighted hit count
    pub score: u32,
    /// Positions of the columns that produced keyword or coordinate hits
    pub matched: BTreeSet<usize>,
}

/// Detect the category of `frame` from its column names.
pub fn detect(frame: &DataFrame, default_category: &str, rules: &[CategoryRule]) -> Detection {
    let columns = frame.column_names();

    let mut best: Option<(&CategoryRule, RuleScore)> = None;
    for rule in rules.iter().filter(|r| r.name != default_category) {
        let scored = score_rule(rule, &columns);
        log::debug!("Category '{}' scored {}", rule.name, scored.score);
        if scored.score == 0 {
            continue;
        }
        if best.as_ref().map_or(true, |(_, b)| scored.score > b.score) {
            best = Some((rule, scored));
        }
    }

    let Some((rule, scored)) = best else {
        return Detection {
            category: default_category.to_string(),
            highlight_columns: Vec::new(),
            score: 0,
        };
    };

    let mut positions = scored.matched;
    for pattern in &rule.highlight_columns {
        let pattern = pattern.to_lowercase();
        if pattern.is_empty() {
            continue;
        }
        positions.extend(
            columns
                .iter()
                .enumerate()
                .filter(|(_, c)| c.to_lowercase().contains(&pattern))
                .map(|(i, _)| i),
        );
    }

    Detection {
        category: rule.name.clone(),
        highlight_columns: positions.into_iter().map(|i| columns[i].clone()).collect(),
        score: scored.score,
    }
}

/// Score a single rule against column names.
pub fn score_rule(rule: &CategoryRule, columns: &[String]) -> RuleScore {
    let lowered: Vec<String> = columns.iter().map(|c| c.to_lowercase()).collect();
    let joined = lowered.join(" ");
    let mut result = RuleScore::default();

    for keyword in &rule.keywords {
        let keyword = keyword.to_lowercase();
        if keyword.is_empty() {
            continue;
        }
        if joined.contains(&keyword) {
            result.score += EXACT_KEYWORD_WEIGHT;
            result.matched.extend(positions_containing(&lowered, &keyword));
        } else if lowered.iter().any(|c| c.contains(&keyword)) {
            result.score += PARTIAL_KEYWORD_WEIGHT;
        }
    }

    for pattern in &rule.coordinate_patterns {
        let pattern = pattern.to_lowercase();
        if pattern.is_empty() || !joined.contains(&pattern) {
            continue;
        }
        result.score += COORDINATE_WEIGHT;
        result.matched.extend(positions_containing(&lowered, &pattern));
    }

    result
}

fn positions_containing<'a>(lowered: &'a [String], needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    lowered
        .iter()
        .enumerate()
        .filter(move |(_, c)| c.contains(needle))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TablesConfig;

    fn frame(columns: &[&str]) -> DataFrame {
        DataFrame::new(columns.iter().copied())
    }

    fn rule(name: &str, keywords: &[&str], coordinates: &[&str]) -> CategoryRule {
        CategoryRule {
            name: name.into(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            coordinate_patterns: coordinates.iter().map(|s| s.to_string()).collect(),
            highlight_columns: Vec::new(),
        }
    }

    #[test]
    fn test_coordinate_category() {
        let config = TablesConfig::builtin().unwrap();
        let detection = detect(
            &frame(&["X (m)", "Y (m)", "Z (m)"]),
            &config.default_category,
            &config.categories,
        );
        assert_eq!(detection.category, "nodes");
        assert_eq!(detection.highlight_columns, vec!["X (m)", "Y (m)", "Z (m)"]);
        assert_eq!(detection.score, 3 * COORDINATE_WEIGHT);
    }

    #[test]
    fn test_no_match_yields_default() {
        let config = TablesConfig::builtin().unwrap();
        let detection = detect(&frame(&["Alpha", "Beta"]), "general", &config.categories);
        assert_eq!(detection.category, "general");
        assert!(detection.highlight_columns.is_empty());
        assert_eq!(detection.score, 0);
    }

    #[test]
    fn test_keyword_inside_longer_name() {
        let columns = vec!["load (kn)".to_string(), "overloaded".to_string()];
        let scored = score_rule(&rule("forces", &["load", "overload"], &[]), &columns);
        assert_eq!(scored.score, 2 * EXACT_KEYWORD_WEIGHT);
        assert_eq!(scored.matched.into_iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_plural_node_column_ties_with_load() {
        let config = TablesConfig::builtin().unwrap();
        let detection = detect(
            &frame(&["Nodes", "Load"]),
            &config.default_category,
            &config.categories,
        );
        assert_eq!(detection.category, "nodes");
        assert_eq!(detection.highlight_columns, vec!["Nodes"]);
        assert_eq!(detection.score, EXACT_KEYWORD_WEIGHT);
    }

    #[test]
    fn test_plural_forces_beats_later_stress_rule() {
        let config = TablesConfig::builtin().unwrap();
        let detection = detect(
            &frame(&["Forces", "Stress"]),
            &config.default_category,
            &config.categories,
        );
        assert_eq!(detection.category, "forces");
        assert_eq!(detection.highlight_columns, vec!["Forces"]);
    }

    #[test]
    fn test_tie_goes_to_first_rule() {
        let rules = vec![rule("first", &["span"], &[]), rule("second", &["beam"], &[])];
        let detection = detect(&frame(&["Span", "Beam"]), "general", &rules);
        assert_eq!(detection.category, "first");
    }

    #[test]
    fn test_default_rule_never_scored() {
        let rules = vec![rule("general", &["value"], &[]), rule("other", &["zzz"], &[])];
        let detection = detect(&frame(&["Value"]), "general", &rules);
        assert_eq!(detection.category, "general");
        assert_eq!(detection.score, 0);
    }

    #[test]
    fn test_highlight_patterns_added_and_deduplicated() {
        let mut forces = rule("forces", &["load"], &[]);
        forces.highlight_columns = vec!["load".into(), "reaction".into()];
        let detection = detect(
            &frame(&["Node", "Reaction Fz", "Load (kN)"]),
            "general",
            &[forces],
        );
        assert_eq!(detection.highlight_columns, vec!["Reaction Fz", "Load (kN)"]);
    }
}
