pub mod advantage;
pub mod color;
pub mod fields;
pub mod legend;
pub mod shares;
pub mod tiers;

pub use advantage::{compute_advantage, rank_candidates, AdvantageResult};
pub use color::{encode_threshold_color, encode_winner_color, shade_color, Palette, Rgb, Rgba};
pub use fields::{extract_candidate_id, resolve_prefix, CandidateFilter, FieldResolver};
pub use legend::{
    build_legend_levels, build_legend_levels_for_prefix, collect_winners, legend_entries,
    merge_legend_levels, LegendCandidate, LegendLevels, LegendSwatch,
};
pub use shares::{extract_fixed_shares, extract_shares, CandidateExtractor, CandidateShareMap};
pub use tiers::{classify_tier, AdvantageTable, ThresholdBand, ThresholdTable, Tier};
