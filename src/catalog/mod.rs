//! Per-election configuration keyed by (level, year).
pub mod builtin;

use crate::classify::color::{ColorError, Palette};
use crate::classify::fields::{CandidateFilter, FieldResolver};
use crate::classify::shares::CandidateExtractor;
use crate::classify::tiers::{AdvantageTable, ThresholdTable};
use crate::model::{ElectionContext, ElectionLevel, Granularity, ListType};
use crate::util::{read_serialized, write_serialized, LoadError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Duplicate catalog entry: {level} {year}")]
    DuplicateEntry { level: ElectionLevel, year: u16 },
    #[error("Bad palette for {level} {year}: {source}")]
    InvalidColor {
        level: ElectionLevel,
        year: u16,
        source: ColorError,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetFile {
    /// Relative to the data directory.
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datasets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<DatasetFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precinct: Option<DatasetFile>,
    /// Data exists only for this ballot type.
    #[serde(default, rename = "listType", skip_serializing_if = "Option::is_none")]
    pub list_type: Option<ListType>,
}

impl Datasets {
    pub fn available_for(&self, list_type: Option<ListType>) -> bool {
        match self.list_type {
            Some(required) => list_type == Some(required),
            None => true,
        }
    }

    pub fn get(&self, granularity: Granularity) -> Option<&DatasetFile> {
        match granularity {
            Granularity::District => self.district.as_ref(),
            Granularity::Precinct => self.precinct.as_ref(),
        }
    }

    pub fn get_mut(&mut self, granularity: Granularity) -> Option<&mut DatasetFile> {
        match granularity {
            Granularity::District => self.district.as_mut(),
            Granularity::Precinct => self.precinct.as_mut(),
        }
    }
}

fn default_advantage() -> AdvantageTable {
    AdvantageTable::standard()
}

fn default_turnout() -> ThresholdTable {
    ThresholdTable::turnout_generic()
}

fn default_invalid() -> ThresholdTable {
    ThresholdTable::invalid_rate()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionConfig {
    pub level: ElectionLevel,
    pub year: u16,
    pub prefix: String,
    pub palette: Palette,
    /// Candidates read directly on district records.
    #[serde(default)]
    pub fixed_candidates: Vec<String>,
    #[serde(default)]
    pub candidate_filter: CandidateFilter,
    #[serde(default = "default_advantage")]
    pub advantage_table: AdvantageTable,
    #[serde(default = "default_turnout")]
    pub turnout_table: ThresholdTable,
    #[serde(default = "default_invalid")]
    pub invalid_table: ThresholdTable,
    #[serde(default)]
    pub datasets: Datasets,
}

impl ElectionConfig {
    pub fn resolver(&self) -> FieldResolver<'_> {
        FieldResolver::new(&self.prefix, &self.candidate_filter)
    }

    pub fn extractor(&self) -> CandidateExtractor<'_> {
        CandidateExtractor::for_config(self)
    }

    pub fn turnout_field(&self) -> String {
        format!("{}явка", self.prefix)
    }

    /// Datasets spell the invalid-ballot counter three different ways.
    pub fn invalid_fields(&self) -> [String; 3] {
        [
            format!("{}недействительны", self.prefix),
            format!("{}недействительных", self.prefix),
            format!("{}недействительные", self.prefix),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionCatalog {
    pub elections: Vec<ElectionConfig>,
}

impl Default for ElectionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ElectionCatalog {
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Read a JSON catalog (optionally gzipped) and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let catalog: ElectionCatalog = read_serialized(path)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_serialized(path, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for config in &self.elections {
            if !seen.insert((config.level, config.year)) {
                return Err(CatalogError::DuplicateEntry {
                    level: config.level,
                    year: config.year,
                });
            }
            config
                .palette
                .validate()
                .map_err(|source| CatalogError::InvalidColor {
                    level: config.level,
                    year: config.year,
                    source,
                })?;
        }
        Ok(())
    }

    pub fn get(&self, context: &ElectionContext) -> Option<&ElectionConfig> {
        self.find(context.level, context.year)
    }

    pub fn find(&self, level: ElectionLevel, year: u16) -> Option<&ElectionConfig> {
        self.elections
            .iter()
            .find(|c| c.level == level && c.year == year)
    }

    /// `""` when the election is not in the catalog.
    pub fn resolve_prefix(&self, level: ElectionLevel, year: u16) -> &str {
        self.find(level, year).map(|c| c.prefix.as_str()).unwrap_or("")
    }

    /// Years with data for `level`, ascending.
    pub fn years(&self, level: ElectionLevel) -> Vec<u16> {
        let mut years: Vec<u16> = self
            .elections
            .iter()
            .filter(|c| c.level == level)
            .map(|c| c.year)
            .collect();
        years.sort_unstable();
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::fields::resolve_prefix;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_matches_prefix_table() {
        let catalog = ElectionCatalog::builtin();
        assert_eq!(catalog.elections.len(), builtin::PREFIXES.len());
        for &(level, year, prefix) in builtin::PREFIXES {
            assert_eq!(catalog.resolve_prefix(level, year), prefix);
            assert_eq!(resolve_prefix(level, year), prefix);
        }
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_builtin_palettes() {
        let catalog = ElectionCatalog::builtin();
        let p2012 = catalog.find(ElectionLevel::President, 2012).unwrap();
        let p2018 = catalog.find(ElectionLevel::President, 2018).unwrap();
        let mayor = catalog.find(ElectionLevel::Mayor, 2013).unwrap();
        let duma = catalog.find(ElectionLevel::Duma, 2016).unwrap();
        assert_eq!(p2012.palette.get("Миронов"), Some("#ffcc00"));
        assert_eq!(p2018.palette.get("Грудинин"), Some("#a50026"));
        assert_eq!(mayor.palette.get("Дегтярёв"), Some("#00bfff"));
        assert_eq!(duma.palette.get("Справедливая_Россия"), Some("#f28c28"));
        assert_eq!(p2018.advantage_table, AdvantageTable::president_2018());
        assert_eq!(p2012.advantage_table, AdvantageTable::standard());
        assert_eq!(p2012.turnout_table, ThresholdTable::turnout_president());
        assert_eq!(mayor.turnout_table, ThresholdTable::turnout_generic());
    }

    #[test]
    fn test_unknown_prefix_is_empty() {
        assert_eq!(ElectionCatalog::builtin().resolve_prefix(ElectionLevel::Mayor, 2023), "");
    }

    #[test]
    fn test_years() {
        let catalog = ElectionCatalog::builtin();
        assert_eq!(catalog.years(ElectionLevel::CityDuma), vec![2014, 2019]);
    }

    #[test]
    fn test_load_rejects_duplicates() {
        let mut catalog = ElectionCatalog::builtin();
        let first = catalog.elections[0].clone();
        catalog.elections.push(first);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateEntry { year: 2012, .. })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = ElectionCatalog::builtin();
        catalog.save(&path).unwrap();
        assert_eq!(ElectionCatalog::load(&path).unwrap(), catalog);
    }

    #[test]
    fn test_load_rejects_bad_color() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r##"{"elections": [{"level": "Mayor", "year": 2013, "prefix": "2013_mer_",
                 "palette": {"Собянин": "blue"}}]}"##,
        )
        .unwrap();
        assert!(matches!(
            ElectionCatalog::load(&path),
            Err(CatalogError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_minimal_entry_gets_defaults() {
        let raw = r##"{"elections": [{"level": "CityDuma", "year": 2024, "prefix": "2024_mgd_",
                       "palette": {"Иванов": "#123456"}}]}"##;
        let catalog: ElectionCatalog = serde_json::from_str(raw).unwrap();
        let config = &catalog.elections[0];
        assert_eq!(config.candidate_filter, CandidateFilter::Capitalized);
        assert_eq!(config.advantage_table, AdvantageTable::standard());
        assert_eq!(config.invalid_table, ThresholdTable::invalid_rate());
        assert!(config.fixed_candidates.is_empty());
    }
}
