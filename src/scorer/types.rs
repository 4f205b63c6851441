use super::overall::OverallRating;
use serde::{Serialize, Serializer};
use std::fmt;

/// Distance to the next overall rating, or `MAX` at the top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextRating {
    Points(i64),
    Max,
}

impl fmt::Display for NextRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextRating::Points(p) => write!(f, "{}", p),
            NextRating::Max => f.write_str("MAX"),
        }
    }
}

impl Serialize for NextRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NextRating::Points(p) => serializer.serialize_i64(*p),
            NextRating::Max => serializer.serialize_str("MAX"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub total_stats_score: i64,
    pub total_skill_score: i64,
    pub unique_skill_score: i64,
    // Always the sum of the three totals above
    pub overall_score: i64,
    pub overall_rating: OverallRating,
    pub points_to_next: NextRating,
}
