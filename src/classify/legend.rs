//! Collection-wide reductions feeding the legend boxes.
use super::advantage::compute_advantage;
use super::color::{shade_color, Palette};
use super::shares::CandidateExtractor;
use super::tiers::{AdvantageTable, Tier};
use crate::model::Feature;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Candidate → highest tier they reach anywhere in the collection.
pub type LegendLevels = BTreeMap<String, Tier>;

/// Features with fewer than two candidates are skipped.
pub fn build_legend_levels(
    features: &[Feature],
    extractor: &CandidateExtractor<'_>,
    table: &AdvantageTable,
) -> LegendLevels {
    let mut levels = LegendLevels::new();
    for feature in features {
        let shares = extractor.extract(&feature.properties);
        if shares.len() < 2 {
            continue;
        }
        let advantage = match compute_advantage(&shares) {
            Some(advantage) => advantage,
            None => continue,
        };
        let tier = table.classify(advantage.margin);
        let entry = levels.entry(advantage.winner).or_insert(tier);
        if *entry < tier {
            *entry = tier;
        }
    }
    levels
}

/// Prefix-only variant: candidates are discovered by key scan.
pub fn build_legend_levels_for_prefix(
    features: &[Feature],
    prefix: &str,
    table: &AdvantageTable,
) -> LegendLevels {
    build_legend_levels(features, &CandidateExtractor::dynamic(prefix), table)
}

/// Merge two partial results; used when a collection is reduced in chunks.
pub fn merge_legend_levels(mut left: LegendLevels, right: LegendLevels) -> LegendLevels {
    for (candidate, tier) in right {
        let entry = left.entry(candidate).or_insert(tier);
        if *entry < tier {
            *entry = tier;
        }
    }
    left
}

/// Distinct winners across the collection, sorted by id.
pub fn collect_winners(features: &[Feature], extractor: &CandidateExtractor<'_>) -> Vec<String> {
    features
        .iter()
        .filter_map(|f| compute_advantage(&extractor.extract(&f.properties)))
        .map(|a| a.winner)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSwatch {
    pub tier: Tier,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendCandidate {
    pub candidate: String,
    pub swatches: Vec<LegendSwatch>,
}

/// One row per candidate with a swatch for every tier up to the one they reached.
pub fn legend_entries(
    levels: &LegendLevels,
    palette: &Palette,
    table: &AdvantageTable,
) -> Vec<LegendCandidate> {
    levels
        .iter()
        .map(|(candidate, max_tier)| {
            let base = palette.color_for(candidate);
            let swatches = (1..=max_tier.get())
                .map(Tier::new)
                .map(|tier| LegendSwatch {
                    tier,
                    color: shade_color(base, table.alpha(tier)).to_string(),
                    label: format!("{}%", table.label(tier).unwrap_or_default()),
                })
                .collect();
            LegendCandidate {
                candidate: candidate.clone(),
                swatches,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FeatureProperties;
    use serde_json::json;

    fn feature(value: serde_json::Value) -> Feature {
        Feature::new(FeatureProperties::from(value))
    }

    fn collection() -> Vec<Feature> {
        vec![
            feature(json!({ "M_Собянин": 45.0, "M_Навальный": 42.0 })),
            feature(json!({ "M_Собянин": 60.0, "M_Навальный": 20.0 })),
            feature(json!({ "M_Навальный": 40.0, "M_Собянин": 33.0 })),
            feature(json!({ "M_Мельников": 80.0 })),
            feature(json!({ "M_явка": 30.0 })),
        ]
    }

    #[test]
    fn test_levels_keep_maximum_tier() {
        let levels =
            build_legend_levels_for_prefix(&collection(), "M_", &AdvantageTable::standard());
        assert_eq!(levels.len(), 2);
        assert_eq!(levels["Собянин"], Tier::new(4));
        assert_eq!(levels["Навальный"], Tier::new(2));
    }

    #[test]
    fn test_single_candidate_features_are_skipped() {
        let levels =
            build_legend_levels_for_prefix(&collection(), "M_", &AdvantageTable::standard());
        assert!(!levels.contains_key("Мельников"));
    }

    #[test]
    fn test_merge_is_max() {
        let table = AdvantageTable::standard();
        let features = collection();
        let (a, b) = features.split_at(2);
        let merged = merge_legend_levels(
            build_legend_levels_for_prefix(b, "M_", &table),
            build_legend_levels_for_prefix(a, "M_", &table),
        );
        assert_eq!(merged, build_legend_levels_for_prefix(&features, "M_", &table));
    }

    #[test]
    fn test_collect_winners() {
        let winners = collect_winners(&collection(), &CandidateExtractor::dynamic("M_"));
        assert_eq!(winners, vec!["Мельников", "Навальный", "Собянин"]);
    }

    #[test]
    fn test_legend_entries() {
        let mut levels = LegendLevels::new();
        levels.insert("Собянин".to_string(), Tier::new(2));
        let palette: Palette = vec![("Собянин", "#0072bc")].into_iter().collect();
        let entries = legend_entries(&levels, &palette, &AdvantageTable::standard());
        assert_eq!(entries.len(), 1);
        let swatches = &entries[0].swatches;
        assert_eq!(swatches.len(), 2);
        assert_eq!(swatches[0].color, "rgba(0,114,188,0.2)");
        assert_eq!(swatches[0].label, "менее 5%");
        assert_eq!(swatches[1].label, "5–10%");
    }
}
