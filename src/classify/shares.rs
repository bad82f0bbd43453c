//! Candidate share extraction from a feature's property record.
use super::fields::FieldResolver;
use crate::catalog::ElectionConfig;
use crate::model::{FeatureProperties, Granularity};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Candidate id → vote share in percent.
pub type CandidateShareMap = BTreeMap<String, f64>;

/// Discover candidates by scanning every key of `props` (capitalization rule).
pub fn extract_shares(props: &FeatureProperties, prefix: &str) -> CandidateShareMap {
    scan_shares(props, &FieldResolver::capitalized(prefix))
}

/// Read a known candidate list by full key; missing fields count as 0.
pub fn extract_fixed_shares<S: AsRef<str>>(
    props: &FeatureProperties,
    prefix: &str,
    candidates: &[S],
) -> CandidateShareMap {
    candidates
        .iter()
        .map(|c| {
            let c = c.as_ref();
            (c.to_string(), props.number(&format!("{}{}", prefix, c)))
        })
        .collect()
}

fn scan_shares(props: &FeatureProperties, resolver: &FieldResolver<'_>) -> CandidateShareMap {
    let mut shares = CandidateShareMap::new();
    // Sorted so that the exact key `…Путин` wins over `…Путин_В_В`.
    for (key, value) in props.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        if let Some(id) = resolver.candidate_id(key) {
            shares
                .entry(id.to_string())
                .or_insert_with(|| crate::model::feature::coerce_number(value));
        }
    }
    shares
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Scan keys; used for precinct records and elections without a fixed list.
    Dynamic,
    /// Read the configured candidate list.
    FixedList,
}

/// One extraction entry point for every election and record granularity.
#[derive(Debug, Clone, Copy)]
pub struct CandidateExtractor<'a> {
    resolver: FieldResolver<'a>,
    fixed: &'a [String],
}

impl<'a> CandidateExtractor<'a> {
    /// Scan-only extractor for a bare prefix.
    pub fn dynamic(prefix: &'a str) -> Self {
        Self {
            resolver: FieldResolver::capitalized(prefix),
            fixed: &[],
        }
    }

    pub fn for_config(config: &'a ElectionConfig) -> Self {
        Self {
            resolver: config.resolver(),
            fixed: &config.fixed_candidates,
        }
    }

    pub fn resolver(&self) -> &FieldResolver<'a> {
        &self.resolver
    }

    pub fn mode_for(&self, granularity: Granularity) -> ExtractionMode {
        if granularity == Granularity::District && !self.fixed.is_empty() {
            ExtractionMode::FixedList
        } else {
            ExtractionMode::Dynamic
        }
    }

    pub fn extract(&self, props: &FeatureProperties) -> CandidateShareMap {
        if self.resolver.prefix().is_empty() {
            return CandidateShareMap::new();
        }
        match self.mode_for(props.granularity()) {
            ExtractionMode::FixedList if self.has_fixed_fields(props) => {
                extract_fixed_shares(props, self.resolver.prefix(), self.fixed)
            }
            // A district record without any listed field has no results.
            ExtractionMode::FixedList => CandidateShareMap::new(),
            ExtractionMode::Dynamic => scan_shares(props, &self.resolver),
        }
    }

    fn has_fixed_fields(&self, props: &FeatureProperties) -> bool {
        let prefix = self.resolver.prefix();
        self.fixed
            .iter()
            .any(|c| props.contains(&format!("{}{}", prefix, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ElectionCatalog;
    use crate::model::{ElectionContext, ElectionLevel};
    use serde_json::json;

    fn props(value: serde_json::Value) -> FeatureProperties {
        FeatureProperties::from(value)
    }

    #[test]
    fn test_dynamic_scan_skips_metadata() {
        let p = props(json!({
            "P_Путин": 70,
            "P_Зюганов": 20,
            "P_явка": 61.2,
            "P_недействительные": 1.1,
            "uik_num": 5,
            "name": "x",
        }));
        let shares = extract_shares(&p, "P_");
        assert_eq!(shares.len(), 2);
        assert_eq!(shares["Путин"], 70.0);
        assert_eq!(shares["Зюганов"], 20.0);
    }

    #[test]
    fn test_dynamic_scan_prefers_exact_key() {
        let p = props(json!({
            "P_Путин_В_В": 1,
            "P_Путин": 70,
        }));
        assert_eq!(extract_shares(&p, "P_")["Путин"], 70.0);
    }

    #[test]
    fn test_unknown_prefix_yields_nothing() {
        let p = props(json!({ "Путин": 70 }));
        assert!(extract_shares(&p, "").is_empty());
        assert!(CandidateExtractor::dynamic("").extract(&p).is_empty());
    }

    #[test]
    fn test_fixed_list_defaults_to_zero() {
        let p = props(json!({
            "2012_president_Путин": 47.0,
            "2012_president_Зюганов": "19.2",
        }));
        let candidates = ["Путин", "Зюганов", "Прохоров"];
        let shares = extract_fixed_shares(&p, "2012_president_", &candidates);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares["Зюганов"], 19.2);
        assert_eq!(shares["Прохоров"], 0.0);
    }

    #[test]
    fn test_extractor_switches_on_granularity() {
        let catalog = ElectionCatalog::builtin();
        let config = catalog
            .get(&ElectionContext::new(ElectionLevel::President, 2012))
            .unwrap();
        let extractor = CandidateExtractor::for_config(config);

        let district = props(json!({ "2012_president_Путин": 47.0 }));
        assert_eq!(extractor.mode_for(district.granularity()), ExtractionMode::FixedList);
        assert_eq!(extractor.extract(&district).len(), 5);

        let precinct = props(json!({
            "uik_num": 1,
            "2012_president_Путин_В_В": 50.0,
            "2012_president_Прохоров_М_Д": 30.0,
        }));
        assert_eq!(extractor.mode_for(precinct.granularity()), ExtractionMode::Dynamic);
        let shares = extractor.extract(&precinct);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares["Прохоров"], 30.0);
    }

    #[test]
    fn test_district_without_listed_fields_is_empty() {
        let catalog = ElectionCatalog::builtin();
        let config = catalog.find(ElectionLevel::President, 2012).unwrap();
        let extractor = CandidateExtractor::for_config(config);
        let district = props(json!({ "name": "Щукино", "2012_president_явка": 60.1 }));
        assert_eq!(extractor.mode_for(district.granularity()), ExtractionMode::FixedList);
        assert!(extractor.extract(&district).is_empty());
    }

    #[test]
    fn test_precinct_scan_keeps_unlisted_candidates() {
        let catalog = ElectionCatalog::builtin();
        let config = catalog.find(ElectionLevel::President, 2018).unwrap();
        let precinct = props(json!({
            "uik_num": 1,
            "2018_president_Путин_В_В": 50.0,
            "2018_president_Бабурин_С_Н": 45.0,
            "2018_president_Грудинин_П_Н": 5.0,
            "2018_president_явка": 70.0,
        }));
        let shares = config.extractor().extract(&precinct);
        assert_eq!(shares.len(), 3);
        assert_eq!(shares["Бабурин"], 45.0);
        assert_eq!(shares["Путин"], 50.0);
    }

    #[test]
    fn test_extractor_without_fixed_list_always_scans() {
        let catalog = ElectionCatalog::builtin();
        let config = catalog
            .get(&ElectionContext::new(ElectionLevel::Duma, 2016))
            .unwrap();
        let extractor = CandidateExtractor::for_config(config);
        let district = props(json!({
            "2016_duma_Единая_Россия": 37.8,
            "2016_duma_КПРФ": 13.9,
            "2016_duma_явка": 35.2,
        }));
        let shares = extractor.extract(&district);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares["Единая_Россия"], 37.8);
    }
}
