use crate::config::UniqueSkillParams;

/// Unique skill points: a per-level rate that steps up once the character
/// reaches the high-star threshold. Neither input is capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueSkillRates {
    pub low_star_points: i64,
    pub high_star_points: i64,
    pub high_star_min: u32,
}

impl Default for UniqueSkillRates {
    fn default() -> Self {
        Self::from(&UniqueSkillParams::default())
    }
}

impl From<&UniqueSkillParams> for UniqueSkillRates {
    fn from(p: &UniqueSkillParams) -> Self {
        Self {
            low_star_points: p.unique_low_star_points,
            high_star_points: p.unique_high_star_points,
            high_star_min: p.unique_high_star_min,
        }
    }
}

impl UniqueSkillRates {
    pub fn score(&self, star_level: u32, skill_level: u32) -> i64 {
        let per_level = if star_level >= self.high_star_min {
            self.high_star_points
        } else {
            self.low_star_points
        };
        per_level.saturating_mul(skill_level as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_threshold() {
        let rates = UniqueSkillRates::default();
        assert_eq!(rates.score(1, 1), 120);
        assert_eq!(rates.score(2, 3), 360);
        assert_eq!(rates.score(3, 3), 510);
        assert_eq!(rates.score(5, 6), 1020);
    }

    #[test]
    fn test_no_ceiling() {
        let rates = UniqueSkillRates::default();
        assert_eq!(rates.score(9, 10), 1700);
    }
}
