pub mod feature;
pub mod view;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use feature::{Feature, FeatureCollection, FeatureProperties, Granularity};
pub use view::{DisplayMode, LayerPlan, ViewState};

/// Top-level election category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ElectionLevel {
    President,
    Mayor,
    Duma,
    CityDuma,
    Municipal,
}

impl ElectionLevel {
    pub const ALL: [ElectionLevel; 5] = [
        ElectionLevel::Duma,
        ElectionLevel::CityDuma,
        ElectionLevel::Municipal,
        ElectionLevel::Mayor,
        ElectionLevel::President,
    ];

    /// Label shown on the level selector.
    pub fn label(self) -> &'static str {
        match self {
            ElectionLevel::President => "Президент",
            ElectionLevel::Mayor => "Мэр",
            ElectionLevel::Duma => "Госдума",
            ElectionLevel::CityDuma => "Мосгордума",
            ElectionLevel::Municipal => "Муниципальные",
        }
    }
}

impl fmt::Display for ElectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown value: {0}")]
pub struct ParseContextError(pub String);

impl FromStr for ElectionLevel {
    type Err = ParseContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_lowercase().as_str() {
            "president" | "президент" => ElectionLevel::President,
            "mayor" | "мэр" => ElectionLevel::Mayor,
            "duma" | "госдума" => ElectionLevel::Duma,
            "city-duma" | "cityduma" | "мосгордума" => ElectionLevel::CityDuma,
            "municipal" | "муниципальные" => ElectionLevel::Municipal,
            _ => return Err(ParseContextError(s.to_string())),
        };
        Ok(level)
    }
}

/// Duma ballots come in two flavours: single-member district and party list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListType {
    District,
    PartyList,
}

impl ListType {
    pub fn label(self) -> &'static str {
        match self {
            ListType::District => "Округ",
            ListType::PartyList => "Список",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ListType {
    type Err = ParseContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "district" | "округ" => Ok(ListType::District),
            "party-list" | "partylist" | "список" => Ok(ListType::PartyList),
            _ => Err(ParseContextError(s.to_string())),
        }
    }
}

/// Which election the caller is rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElectionContext {
    pub level: ElectionLevel,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_type: Option<ListType>,
}

impl ElectionContext {
    pub fn new(level: ElectionLevel, year: u16) -> Self {
        Self {
            level,
            year,
            list_type: None,
        }
    }

    pub fn with_list_type(mut self, list_type: ListType) -> Self {
        self.list_type = Some(list_type);
        self
    }
}

impl fmt::Display for ElectionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.level, self.year)?;
        if let Some(list_type) = self.list_type {
            write!(f, " ({})", list_type)?;
        }
        Ok(())
    }
}
