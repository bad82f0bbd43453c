//! Per-feature styling for one [`ViewState`].
//!
//! The engine never fails. An election missing from the catalog styles every
//! feature with the no-data fill, and missing fields read as 0.
use crate::catalog::{ElectionCatalog, ElectionConfig};
use crate::classify::advantage::{compute_advantage, AdvantageResult};
use crate::classify::color::{encode_threshold_color, encode_winner_color, Rgba, NO_DATA};
use crate::classify::legend::{
    build_legend_levels, collect_winners, legend_entries, LegendCandidate, LegendLevels,
};
use crate::classify::shares::{CandidateExtractor, CandidateShareMap};
use crate::classify::tiers::{ThresholdTable, Tier};
use crate::model::{DisplayMode, Feature, FeatureProperties, Granularity, LayerPlan, ViewState};
use crate::reports::InfoPanel;
use serde::Serialize;

/// Leaflet-style path options for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    #[serde(rename = "color")]
    pub stroke: String,
    pub weight: u32,
    pub fill_opacity: f64,
    pub fill_color: String,
}

impl FeatureStyle {
    fn winner(granularity: Granularity, fill: Rgba) -> Self {
        let (stroke, weight) = match granularity {
            Granularity::District => ("#000", 2),
            Granularity::Precinct => ("#333", 1),
        };
        Self {
            stroke: stroke.to_string(),
            weight,
            fill_opacity: 1.0,
            fill_color: fill.to_string(),
        }
    }

    fn threshold(fill: &str) -> Self {
        Self {
            stroke: "#000".to_string(),
            weight: 1,
            fill_opacity: 0.8,
            fill_color: fill.to_string(),
        }
    }

    /// Used when the election is unknown.
    pub fn neutral() -> Self {
        Self {
            stroke: "#000".to_string(),
            weight: 1,
            fill_opacity: 1.0,
            fill_color: NO_DATA.to_string(),
        }
    }
}

pub struct StyleEngine<'a> {
    view: ViewState,
    config: Option<&'a ElectionConfig>,
}

impl<'a> StyleEngine<'a> {
    pub fn new(catalog: &'a ElectionCatalog, view: ViewState) -> Self {
        Self {
            view,
            config: catalog.get(&view.context),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> Option<&'a ElectionConfig> {
        self.config
    }

    pub fn layers(&self) -> LayerPlan {
        self.view.layers(self.config)
    }

    pub fn shares(&self, props: &FeatureProperties) -> CandidateShareMap {
        match self.config {
            Some(config) => CandidateExtractor::for_config(config).extract(props),
            None => CandidateShareMap::new(),
        }
    }

    pub fn advantage(&self, props: &FeatureProperties) -> Option<AdvantageResult> {
        compute_advantage(&self.shares(props))
    }

    /// Winner color shaded by advantage tier; a lone candidate gets tier 1.
    pub fn winner_color(&self, props: &FeatureProperties) -> Rgba {
        let config = match self.config {
            Some(config) => config,
            None => return NO_DATA,
        };
        match self.advantage(props) {
            Some(result) => {
                let tier = config.advantage_table.classify(result.margin);
                encode_winner_color(
                    Some(result.winner.as_str()),
                    tier,
                    &config.palette,
                    &config.advantage_table,
                )
            }
            None => encode_winner_color(
                None,
                Tier::MIN,
                &config.palette,
                &config.advantage_table,
            ),
        }
    }

    pub fn turnout(&self, props: &FeatureProperties) -> f64 {
        self.config
            .map(|config| props.number(&config.turnout_field()))
            .unwrap_or(0.0)
    }

    pub fn invalid_rate(&self, props: &FeatureProperties) -> f64 {
        let config = match self.config {
            Some(config) => config,
            None => return 0.0,
        };
        config
            .invalid_fields()
            .iter()
            .find(|field| props.contains(field))
            .map(|field| props.number(field))
            .unwrap_or(0.0)
    }

    /// Band table behind the current threshold mode; `None` in winner mode.
    pub fn threshold_table(&self) -> Option<&'a ThresholdTable> {
        let config = self.config?;
        match self.view.mode {
            DisplayMode::Winner => None,
            DisplayMode::Turnout => Some(&config.turnout_table),
            DisplayMode::InvalidRate => Some(&config.invalid_table),
        }
    }

    pub fn style(&self, props: &FeatureProperties) -> FeatureStyle {
        let config = match self.config {
            Some(config) => config,
            None => return FeatureStyle::neutral(),
        };
        match self.view.mode {
            DisplayMode::Winner => {
                FeatureStyle::winner(props.granularity(), self.winner_color(props))
            }
            DisplayMode::Turnout => FeatureStyle::threshold(encode_threshold_color(
                self.turnout(props),
                &config.turnout_table,
            )),
            DisplayMode::InvalidRate => FeatureStyle::threshold(encode_threshold_color(
                self.invalid_rate(props),
                &config.invalid_table,
            )),
        }
    }

    pub fn style_feature(&self, feature: &Feature) -> FeatureStyle {
        self.style(&feature.properties)
    }

    pub fn legend_levels(&self, features: &[Feature]) -> LegendLevels {
        match self.config {
            Some(config) => build_legend_levels(
                features,
                &CandidateExtractor::for_config(config),
                &config.advantage_table,
            ),
            None => LegendLevels::new(),
        }
    }

    pub fn winners(&self, features: &[Feature]) -> Vec<String> {
        match self.config {
            Some(config) => collect_winners(features, &CandidateExtractor::for_config(config)),
            None => Vec::new(),
        }
    }

    pub fn legend(&self, features: &[Feature]) -> Vec<LegendCandidate> {
        match self.config {
            Some(config) => legend_entries(
                &self.legend_levels(features),
                &config.palette,
                &config.advantage_table,
            ),
            None => Vec::new(),
        }
    }

    pub fn info_panel(&self, props: &FeatureProperties) -> Option<InfoPanel> {
        self.config.map(|config| InfoPanel::build(props, config))
    }
}
