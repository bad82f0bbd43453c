use super::{ElectionContext, Granularity};
use crate::catalog::ElectionConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Zoom level above which precincts replace districts.
pub const PRECINCT_ZOOM: f64 = 12.0;

/// What the fill color encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayMode {
    Winner,
    Turnout,
    InvalidRate,
}

impl DisplayMode {
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Winner => "Победитель",
            DisplayMode::Turnout => "Явка",
            DisplayMode::InvalidRate => "Процент испорченных бюллетеней",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DisplayMode {
    type Err = super::ParseContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "winner" | "победитель" => Ok(DisplayMode::Winner),
            "turnout" | "явка" => Ok(DisplayMode::Turnout),
            "invalid" | "invalid-rate" | "процент испорченных бюллетеней" => {
                Ok(DisplayMode::InvalidRate)
            }
            _ => Err(super::ParseContextError(s.to_string())),
        }
    }
}

/// Everything the engine needs to know about the current render, passed by value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub context: ElectionContext,
    pub mode: DisplayMode,
    pub zoom: f64,
}

impl ViewState {
    pub fn new(context: ElectionContext, mode: DisplayMode, zoom: f64) -> Self {
        Self {
            context,
            mode,
            zoom,
        }
    }

    pub fn granularity(&self) -> Granularity {
        if self.zoom > PRECINCT_ZOOM {
            Granularity::Precinct
        } else {
            Granularity::District
        }
    }

    /// Decide which layers to draw given the datasets available for this election.
    pub fn layers(&self, config: Option<&ElectionConfig>) -> LayerPlan {
        let (has_district, has_precinct) = match config {
            Some(config) if config.datasets.available_for(self.context.list_type) => (
                config.datasets.district.is_some(),
                config.datasets.precinct.is_some(),
            ),
            _ => (false, false),
        };
        let show_precincts = self.granularity() == Granularity::Precinct;

        LayerPlan {
            district_fill: has_district && !show_precincts,
            district_outline: has_district && show_precincts,
            precinct_fill: has_precinct && show_precincts,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerPlan {
    pub district_fill: bool,
    /// District borders drawn over the precinct layer.
    pub district_outline: bool,
    pub precinct_fill: bool,
}

impl LayerPlan {
    /// The layer whose features get styled, if any.
    pub fn styled_layer(&self) -> Option<Granularity> {
        if self.precinct_fill {
            Some(Granularity::Precinct)
        } else if self.district_fill {
            Some(Granularity::District)
        } else {
            None
        }
    }
}
