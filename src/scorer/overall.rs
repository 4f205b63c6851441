use super::types::{NextRating, ScoreSummary};
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString,
)]
pub enum OverallRating {
    #[strum(to_string = "G")]
    G,
    #[strum(to_string = "G+")]
    GPlus,
    #[strum(to_string = "F")]
    F,
    #[strum(to_string = "F+")]
    FPlus,
    #[strum(to_string = "E")]
    E,
    #[strum(to_string = "E+")]
    EPlus,
    #[strum(to_string = "D")]
    D,
    #[strum(to_string = "D+")]
    DPlus,
    #[strum(to_string = "C")]
    C,
    #[strum(to_string = "C+")]
    CPlus,
    #[strum(to_string = "B")]
    B,
    #[strum(to_string = "B+")]
    BPlus,
    #[strum(to_string = "A")]
    A,
    #[strum(to_string = "A+")]
    APlus,
    #[strum(to_string = "S")]
    S,
    #[strum(to_string = "S+")]
    SPlus,
    #[strum(to_string = "SS")]
    SS,
    #[strum(to_string = "SS+")]
    SSPlus,
}

impl Serialize for OverallRating {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Minimum overall score of each rating, highest first.
pub const RATING_THRESHOLDS: [(i64, OverallRating); 18] = [
    (19200, OverallRating::SSPlus),
    (17500, OverallRating::SS),
    (15900, OverallRating::SPlus),
    (14500, OverallRating::S),
    (12100, OverallRating::APlus),
    (10000, OverallRating::A),
    (8200, OverallRating::BPlus),
    (6500, OverallRating::B),
    (4900, OverallRating::CPlus),
    (3500, OverallRating::C),
    (2900, OverallRating::DPlus),
    (2300, OverallRating::D),
    (1800, OverallRating::EPlus),
    (1300, OverallRating::E),
    (900, OverallRating::FPlus),
    (600, OverallRating::F),
    (300, OverallRating::GPlus),
    (0, OverallRating::G),
];

impl OverallRating {
    /// Highest rating whose threshold the score reaches. Negative totals
    /// (heavy purple rosters) read as G.
    pub fn for_score(overall: i64) -> OverallRating {
        RATING_THRESHOLDS
            .iter()
            .find(|(min, _)| overall >= *min)
            .map_or(OverallRating::G, |(_, rating)| *rating)
    }

    pub fn threshold(self) -> i64 {
        RATING_THRESHOLDS
            .iter()
            .find(|(_, rating)| *rating == self)
            .map_or(0, |(min, _)| *min)
    }

    pub fn next(self) -> Option<OverallRating> {
        let idx = RATING_THRESHOLDS.iter().position(|(_, r)| *r == self)?;
        idx.checked_sub(1).map(|i| RATING_THRESHOLDS[i].1)
    }
}

pub fn points_to_next(overall: i64, rating: OverallRating) -> NextRating {
    match rating.next() {
        Some(next) => NextRating::Points((next.threshold() - overall).max(0)),
        None => NextRating::Max,
    }
}

/// Sums the three sections and rates the result. Always a full recompute.
pub fn aggregate(stat_scores: &[i64], skill_scores: &[i64], unique_skill_score: i64) -> ScoreSummary {
    let total_stats_score: i64 = stat_scores.iter().sum();
    let total_skill_score: i64 = skill_scores.iter().sum();
    let overall_score = total_stats_score + total_skill_score + unique_skill_score;
    let overall_rating = OverallRating::for_score(overall_score);

    ScoreSummary {
        total_stats_score,
        total_skill_score,
        unique_skill_score,
        overall_score,
        overall_rating,
        points_to_next: points_to_next(overall_score, overall_rating),
    }
}
