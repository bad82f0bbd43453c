use super::shares::CandidateShareMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Winner of a feature and how far ahead of the runner-up they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvantageResult {
    pub winner: String,
    #[serde(rename = "winnerShare")]
    pub winner_share: f64,
    #[serde(rename = "runnerUp")]
    pub runner_up: Option<String>,
    /// Percentage points; 0 when there is no runner-up.
    pub margin: f64,
}

/// Descending by share; equal shares are ordered by candidate id.
pub fn compare_standing(a: (&str, f64), b: (&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Candidates from first to last place.
pub fn rank_candidates(shares: &CandidateShareMap) -> Vec<(&str, f64)> {
    shares
        .iter()
        .map(|(id, share)| (id.as_str(), *share))
        .sorted_by(|a, b| compare_standing(*a, *b))
        .collect()
}

/// `None` when there are no candidates at all.
pub fn compute_advantage(shares: &CandidateShareMap) -> Option<AdvantageResult> {
    let ranked = rank_candidates(shares);
    let (winner, winner_share) = *ranked.first()?;
    let runner_up = ranked.get(1).copied();

    Some(AdvantageResult {
        winner: winner.to_string(),
        winner_share,
        runner_up: runner_up.map(|(id, _)| id.to_string()),
        margin: runner_up.map(|(_, share)| winner_share - share).unwrap_or(0.0),
    })
}
