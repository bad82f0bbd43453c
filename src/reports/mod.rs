//! JSON documents handed to the map front end.
use crate::catalog::ElectionConfig;
use crate::classify::advantage::{rank_candidates, AdvantageResult};
use crate::classify::color::PANEL_GRAY;
use crate::classify::legend::{LegendCandidate, LegendLevels};
use crate::classify::tiers::ThresholdBand;
use crate::engine::{FeatureStyle, StyleEngine};
use crate::model::{
    DisplayMode, ElectionContext, Feature, FeatureProperties, Granularity, LayerPlan,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// One bar of the click-through breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoRow {
    pub candidate: String,
    pub share: f64,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub title: String,
    pub rows: Vec<InfoRow>,
}

impl InfoPanel {
    /// Candidates from first to last place with their palette colors.
    pub fn build(props: &FeatureProperties, config: &ElectionConfig) -> Self {
        let shares = config.extractor().extract(props);
        let rows = rank_candidates(&shares)
            .into_iter()
            .map(|(candidate, share)| InfoRow {
                candidate: candidate.to_string(),
                share,
                label: format!("{:.1}%", share),
                color: config
                    .palette
                    .get(candidate)
                    .unwrap_or(PANEL_GRAY)
                    .to_string(),
            })
            .collect();

        InfoPanel {
            title: props.title(),
            rows,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StyledFeature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub title: String,
    pub granularity: Granularity,
    pub style: FeatureStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advantage: Option<AdvantageResult>,
}

/// Styles for every feature of one collection under one view.
#[derive(Debug, Serialize)]
pub struct StyleReport {
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    pub context: ElectionContext,
    pub mode: DisplayMode,
    pub zoom: f64,
    pub layers: LayerPlan,
    pub features: Vec<StyledFeature>,
}

impl StyleReport {
    pub fn build(engine: &StyleEngine<'_>, features: &[Feature]) -> Self {
        let view = engine.view();
        let features = features
            .iter()
            .map(|feature| StyledFeature {
                id: feature.id.clone(),
                title: feature.title(),
                granularity: feature.properties.granularity(),
                style: engine.style_feature(feature),
                advantage: engine.advantage(&feature.properties),
            })
            .collect();

        StyleReport {
            generated_at: Utc::now(),
            context: view.context,
            mode: view.mode,
            zoom: view.zoom,
            layers: engine.layers(),
            features,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LegendReport {
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
    pub context: ElectionContext,
    pub mode: DisplayMode,
    pub levels: LegendLevels,
    /// Every candidate that wins somewhere, including single-candidate features.
    pub winners: Vec<String>,
    pub candidates: Vec<LegendCandidate>,
    /// Highest band first; empty in winner mode.
    pub bands: Vec<ThresholdBand>,
}

impl LegendReport {
    pub fn build(engine: &StyleEngine<'_>, features: &[Feature]) -> Self {
        let view = engine.view();
        let bands: Vec<ThresholdBand> = engine
            .threshold_table()
            .map(|table| table.legend().into_iter().cloned().collect())
            .unwrap_or_default();

        LegendReport {
            generated_at: Utc::now(),
            context: view.context,
            mode: view.mode,
            levels: engine.legend_levels(features),
            winners: engine.winners(features),
            candidates: engine.legend(features),
            bands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ElectionCatalog;
    use crate::model::{ElectionLevel, ViewState};
    use serde_json::json;

    #[test]
    fn test_info_panel_rows() {
        let catalog = ElectionCatalog::builtin();
        let config = catalog.find(ElectionLevel::Mayor, 2018).unwrap();
        let props = FeatureProperties::from(json!({
            "uik_num": 2301,
            "2018_mer_Собянин": 71.04,
            "2018_mer_Сурайкин": 3.46,
            "2018_mer_Свиридов": 3.46,
            "2018_mer_явка": 30.1,
        }));
        let panel = InfoPanel::build(&props, config);
        assert_eq!(panel.title, "УИК №2301");
        let candidates: Vec<&str> = panel.rows.iter().map(|r| r.candidate.as_str()).collect();
        assert_eq!(candidates, vec!["Собянин", "Свиридов", "Сурайкин"]);
        assert_eq!(panel.rows[0].label, "71.0%");
        assert_eq!(panel.rows[0].color, "#0072bc");
        assert_eq!(panel.rows[1].color, PANEL_GRAY);
    }

    #[test]
    fn test_style_report_serializes_camel_case() {
        let catalog = ElectionCatalog::builtin();
        let view = ViewState::new(
            ElectionContext::new(ElectionLevel::Mayor, 2013),
            DisplayMode::Winner,
            10.0,
        );
        let engine = StyleEngine::new(&catalog, view);
        let features = vec![Feature::new(FeatureProperties::from(json!({
            "name": "Арбат",
            "2013_mer_Собянин": 46.0,
            "2013_mer_Навальный": 32.0,
        })))];
        let report = StyleReport::build(&engine, &features);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("generatedAt").is_some());
        assert_eq!(value["features"][0]["title"], "Арбат");
        assert_eq!(value["features"][0]["style"]["fillColor"], "rgba(0,114,188,0.6)");
        assert_eq!(value["features"][0]["advantage"]["runnerUp"], "Навальный");
        assert_eq!(value["layers"]["district_fill"], true);
    }

    #[test]
    fn test_legend_report_bands() {
        let catalog = ElectionCatalog::builtin();
        let view = ViewState::new(
            ElectionContext::new(ElectionLevel::President, 2018),
            DisplayMode::Turnout,
            10.0,
        );
        let engine = StyleEngine::new(&catalog, view);
        let report = LegendReport::build(&engine, &[]);
        assert_eq!(report.bands.len(), 5);
        assert_eq!(report.bands[0].label, "более 70%");
        assert!(report.candidates.is_empty());
    }
}
