//! Field resolution: raw property keys look like `<prefix><Candidate>[_suffix]`.
use crate::catalog::builtin;
use crate::model::ElectionLevel;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref CANDIDATE_RX: Regex = Regex::new(r"^[А-ЯЁ]").unwrap();
}

static CAPITALIZED: CandidateFilter = CandidateFilter::Capitalized;

/// Field prefix of a built-in election, or `""` when there is no data for it.
pub fn resolve_prefix(level: ElectionLevel, year: u16) -> &'static str {
    builtin::PREFIXES
        .iter()
        .find(|(l, y, _)| *l == level && *y == year)
        .map(|(_, _, prefix)| *prefix)
        .unwrap_or("")
}

/// Candidate identifier of `raw_key`, or `None` if the key is not a candidate field.
///
/// The identifier is the part after `prefix` and before the first `_`. Only
/// fragments starting with an uppercase Cyrillic letter count; turnout and
/// invalid-ballot counters share the prefix but are lowercase.
pub fn extract_candidate_id<'a>(raw_key: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let rest = raw_key.strip_prefix(prefix)?;
    let id = rest.split('_').next().unwrap_or(rest);
    if CANDIDATE_RX.is_match(id) {
        Some(id)
    } else {
        None
    }
}

/// How candidate fields are told apart from metadata sharing the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ids", rename_all = "snake_case")]
pub enum CandidateFilter {
    /// Anything starting with an uppercase Cyrillic letter.
    Capitalized,
    /// Only the listed identifiers. Ids may contain `_` (`Единая_Россия`).
    AllowList(Vec<String>),
    /// Listed identifiers first, the capitalization rule for everything else.
    KnownThenCapitalized(Vec<String>),
}

impl Default for CandidateFilter {
    fn default() -> Self {
        CandidateFilter::Capitalized
    }
}

impl CandidateFilter {
    pub fn candidate_id<'a>(&'a self, raw_key: &'a str, prefix: &str) -> Option<&'a str> {
        match self {
            CandidateFilter::Capitalized => extract_candidate_id(raw_key, prefix),
            CandidateFilter::AllowList(ids) => listed_id(ids, raw_key, prefix),
            CandidateFilter::KnownThenCapitalized(ids) => listed_id(ids, raw_key, prefix)
                .or_else(|| extract_candidate_id(raw_key, prefix)),
        }
    }
}

/// Longest listed id that is the whole remainder or followed by `_`.
fn listed_id<'a>(ids: &'a [String], raw_key: &str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let rest = raw_key.strip_prefix(prefix)?;
    ids.iter()
        .filter(|id| {
            rest == id.as_str()
                || (rest.starts_with(id.as_str()) && rest[id.len()..].starts_with('_'))
        })
        .max_by_key(|id| id.len())
        .map(String::as_str)
}

/// Prefix plus filter: everything needed to recognise one election's candidate keys.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    prefix: &'a str,
    filter: &'a CandidateFilter,
}

impl<'a> FieldResolver<'a> {
    pub fn new(prefix: &'a str, filter: &'a CandidateFilter) -> Self {
        Self { prefix, filter }
    }

    /// Resolver using the capitalization rule only.
    pub fn capitalized(prefix: &'a str) -> Self {
        Self::new(prefix, &CAPITALIZED)
    }

    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    pub fn candidate_id<'k>(&self, raw_key: &'k str) -> Option<&'k str>
    where
        'a: 'k,
    {
        self.filter.candidate_id(raw_key, self.prefix)
    }
}
