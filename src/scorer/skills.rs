use super::aptitude::{Aptitude, AptitudeMultipliers, CheckType, RatingLevel};
use serde::{Deserialize, Serialize};

/// Per-rating-level point values of a skill. Any column may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrible: Option<i64>,
}

impl ScoreTable {
    pub fn level(&self, level: RatingLevel) -> Option<i64> {
        match level {
            RatingLevel::Good => self.good,
            RatingLevel::Average => self.average,
            RatingLevel::Bad => self.bad,
            RatingLevel::Terrible => self.terrible,
        }
    }

    /// Column for `level`, else base, else good, else zero.
    pub fn lookup(&self, level: RatingLevel) -> i64 {
        self.level(level)
            .or(self.base)
            .or(self.good)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_none()
            && self.good.is_none()
            && self.average.is_none()
            && self.bad.is_none()
            && self.terrible.is_none()
    }
}

/// Skill point value: a flat number (IUS skills) or a per-level table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillScore {
    Flat(i64),
    Table(ScoreTable),
}

impl Default for SkillScore {
    fn default() -> Self {
        SkillScore::Flat(0)
    }
}

/// Rounds .5 upwards (toward +inf), so -40.5 becomes -40.
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Final score of one skill given the aptitude on its check type.
///
/// Flat scores pass through. Tables pick the column for the aptitude's
/// rating level (good when the check type or aptitude is unknown), then
/// apply the aptitude multiplier. A multiplier of exactly 1.0 leaves the
/// value untouched.
pub fn resolve(
    score: &SkillScore,
    check: Option<CheckType>,
    aptitude: Option<Aptitude>,
    multipliers: &AptitudeMultipliers,
) -> i64 {
    let table = match score {
        SkillScore::Flat(v) => return *v,
        SkillScore::Table(t) => t,
    };

    let aptitude = check.and(aptitude);
    let level = aptitude.map_or(RatingLevel::Good, Aptitude::rating_level);
    let value = table.lookup(level);

    let Some(aptitude) = aptitude else {
        return value;
    };
    let multiplier = multipliers.multiplier_for(aptitude);
    if multiplier == 1.0 {
        value
    } else {
        round_half_up(value as f64 * multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn late_table() -> SkillScore {
        SkillScore::Table(ScoreTable {
            base: None,
            good: Some(217),
            average: Some(177),
            bad: Some(158),
            terrible: Some(138),
        })
    }

    #[test]
    fn test_full_aptitude_is_untouched() {
        let m = AptitudeMultipliers::default();
        assert_eq!(
            resolve(&late_table(), Some(CheckType::Late), Some(Aptitude::SA), &m),
            217
        );
    }

    #[test]
    fn test_level_and_multiplier_both_apply() {
        let m = AptitudeMultipliers::default();
        assert_eq!(
            resolve(&late_table(), Some(CheckType::Late), Some(Aptitude::G), &m),
            69
        );
        // 177 * 0.8 = 141.6
        assert_eq!(
            resolve(&late_table(), Some(CheckType::Late), Some(Aptitude::BC), &m),
            142
        );
    }

    #[test]
    fn test_missing_level_falls_back() {
        let m = AptitudeMultipliers::default();
        let only_base = SkillScore::Table(ScoreTable {
            base: Some(100),
            ..Default::default()
        });
        assert_eq!(
            resolve(&only_base, Some(CheckType::End), Some(Aptitude::DEF), &m),
            60
        );
        let only_good = SkillScore::Table(ScoreTable {
            good: Some(90),
            ..Default::default()
        });
        assert_eq!(
            resolve(&only_good, Some(CheckType::End), Some(Aptitude::BC), &m),
            72
        );
        let empty = SkillScore::Table(ScoreTable::default());
        assert_eq!(resolve(&empty, Some(CheckType::End), Some(Aptitude::G), &m), 0);
    }

    #[test]
    fn test_no_check_type_reads_good_unscaled() {
        let m = AptitudeMultipliers::default();
        assert_eq!(resolve(&late_table(), None, Some(Aptitude::G), &m), 217);
        assert_eq!(resolve(&late_table(), Some(CheckType::Late), None, &m), 217);
    }

    #[test]
    fn test_flat_score_ignores_aptitude() {
        let m = AptitudeMultipliers::default();
        let flat = SkillScore::Flat(600);
        assert_eq!(resolve(&flat, Some(CheckType::Pace), Some(Aptitude::G), &m), 600);
    }

    #[test]
    fn test_negative_scores_round_half_up() {
        let m = AptitudeMultipliers::default();
        let purple = SkillScore::Table(ScoreTable {
            terrible: Some(-81),
            ..Default::default()
        });
        // -40.5 -> -40
        assert_eq!(
            resolve(&purple, Some(CheckType::End), Some(Aptitude::G), &m),
            -40
        );
    }

    #[test]
    fn test_untagged_score_parsing() {
        let flat: SkillScore = serde_json::from_str("620").unwrap();
        assert_eq!(flat, SkillScore::Flat(620));
        let table: SkillScore =
            serde_json::from_str(r#"{"base": 508, "good": 508, "terrible": 323}"#).unwrap();
        match table {
            SkillScore::Table(t) => {
                assert_eq!(t.lookup(RatingLevel::Terrible), 323);
                assert_eq!(t.lookup(RatingLevel::Average), 508);
            }
            SkillScore::Flat(_) => panic!("expected a table"),
        }
    }
}
