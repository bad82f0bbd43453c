//! Ordered threshold tables: advantage tiers, turnout bands, invalid-ballot bands.
//!
//! Every table is an ascending list of limits; a value belongs to the first
//! entry whose limit is strictly greater than the value.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color returned when a value falls past every band.
pub const NO_BAND_COLOR: &str = "#ccc";

/// Discrete advantage bucket, 1 (narrow) to 4 (landslide) for the built-in tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(u8);

impl Tier {
    pub const MIN: Tier = Tier(1);

    /// Tiers below 1 are clamped to 1.
    pub fn new(tier: u8) -> Self {
        Tier(tier.max(1))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0.saturating_sub(1))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvantageStep {
    pub limit: f64,
    pub alpha: f64,
    pub label: String,
}

/// Margin → tier → opacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvantageTable {
    pub steps: Vec<AdvantageStep>,
}

fn steps(limits: [f64; 4], labels: [&str; 4]) -> Vec<AdvantageStep> {
    const ALPHAS: [f64; 4] = [0.2, 0.4, 0.6, 0.85];
    limits
        .iter()
        .zip(ALPHAS.iter())
        .zip(labels.iter())
        .map(|((&limit, &alpha), label)| AdvantageStep {
            limit,
            alpha,
            label: label.to_string(),
        })
        .collect()
}

impl AdvantageTable {
    /// Used for every election except the 2018 presidential one.
    pub fn standard() -> Self {
        Self {
            steps: steps(
                [5.0, 10.0, 15.0, 100.0],
                ["менее 5", "5–10", "10–20", "более 20"],
            ),
        }
    }

    /// 2018 presidential election.
    pub fn president_2018() -> Self {
        Self {
            steps: steps(
                [40.0, 50.0, 60.0, 100.0],
                ["менее 40", "40–50", "50–60", "более 60"],
            ),
        }
    }

    pub fn classify(&self, margin: f64) -> Tier {
        classify_tier(margin, self)
    }

    pub fn max_tier(&self) -> Tier {
        Tier::new(self.steps.len().min(u8::MAX as usize) as u8)
    }

    pub fn step(&self, tier: Tier) -> Option<&AdvantageStep> {
        self.steps.get(tier.index())
    }

    /// Opacity for `tier`; out-of-range tiers use the strongest step.
    pub fn alpha(&self, tier: Tier) -> f64 {
        self.step(tier)
            .or_else(|| self.steps.last())
            .map(|s| s.alpha)
            .unwrap_or(1.0)
    }

    pub fn label(&self, tier: Tier) -> Option<&str> {
        self.step(tier).map(|s| s.label.as_str())
    }
}

impl Default for AdvantageTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Tier of the first step whose limit exceeds `margin`; past the last limit
/// the top tier is used.
pub fn classify_tier(margin: f64, table: &AdvantageTable) -> Tier {
    match table.steps.iter().position(|s| margin < s.limit) {
        Some(idx) => Tier::new((idx + 1).min(u8::MAX as usize) as u8),
        None => table.max_tier(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBand {
    pub limit: f64,
    pub color: String,
    pub label: String,
}

/// Flat-colored bands for turnout and invalid-ballot rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub bands: Vec<ThresholdBand>,
}

fn bands(rows: &[(f64, &str, &str)]) -> Vec<ThresholdBand> {
    rows.iter()
        .map(|&(limit, color, label)| ThresholdBand {
            limit,
            color: color.to_string(),
            label: label.to_string(),
        })
        .collect()
}

impl ThresholdTable {
    pub fn turnout_generic() -> Self {
        Self {
            bands: bands(&[
                (20.0, "#e6f4ea", "менее 20%"),
                (35.0, "#a6d9b7", "20–35%"),
                (50.0, "#5bbf83", "35–50%"),
                (65.0, "#3a9d66", "50–65%"),
                (101.0, "#21814f", "более 65%"),
            ]),
        }
    }

    pub fn turnout_president() -> Self {
        Self {
            bands: bands(&[
                (50.0, "#e6f4ea", "менее 50%"),
                (60.0, "#a6d9b7", "50–60%"),
                (65.0, "#5bbf83", "60–65%"),
                (70.0, "#3a9d66", "65–70%"),
                (101.0, "#21814f", "более 70%"),
            ]),
        }
    }

    pub fn invalid_rate() -> Self {
        Self {
            bands: bands(&[
                (0.5, "#fde8ef", "менее 0,5%"),
                (1.0, "#fcd2e1", "0,5–1%"),
                (1.5, "#f7b6cf", "1–1,5%"),
                (2.0, "#ef6cae", "1,5–2%"),
                (100.0, "#c51b8a", "более 2%"),
            ]),
        }
    }

    pub fn bucket(&self, value: f64) -> Option<&ThresholdBand> {
        self.bands.iter().find(|b| value < b.limit)
    }

    /// Bands from highest to lowest, the order legend boxes list them in.
    pub fn legend(&self) -> Vec<&ThresholdBand> {
        self.bands.iter().rev().collect()
    }
}
