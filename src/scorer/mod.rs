pub mod aptitude;
pub mod overall;
pub mod skills;
pub mod stats;
pub mod types;
pub mod unique;

use self::aptitude::{Aptitude, AptitudeMultipliers, CheckType};
use self::skills::SkillScore;
use self::stats::{StatCurve, StatRank, StatValue};
use self::unique::UniqueSkillRates;
pub use self::types::{NextRating, ScoreSummary};
use crate::config::Config;
use crate::error::UcResult;
use tracing::debug;

/// The configured scoring tables. Immutable once built; every method is a
/// pure function of its arguments and these tables.
#[derive(Debug, Clone)]
pub struct Scorer {
    pub curve: StatCurve,
    pub aptitude: AptitudeMultipliers,
    pub unique: UniqueSkillRates,
}

impl Scorer {
    pub fn new(config: &Config) -> UcResult<Self> {
        let multipliers = config.stats.get_multipliers()?;
        debug!(
            "Stat curve: {} multipliers, block size {}",
            multipliers.len(),
            config.stats.stat_block_size
        );
        let curve = StatCurve::new(config.stats.stat_block_size, multipliers)?;

        Ok(Self {
            curve,
            aptitude: AptitudeMultipliers::from(&config.aptitude),
            unique: UniqueSkillRates::from(&config.unique),
        })
    }

    pub fn stat_score(&self, stat: StatValue) -> i64 {
        self.curve.score(stat)
    }

    pub fn stat_rank(&self, stat: StatValue) -> StatRank {
        stats::rate(stat)
    }

    pub fn aptitude_multiplier(&self, aptitude: Aptitude) -> f64 {
        self.aptitude.multiplier_for(aptitude)
    }

    pub fn resolve_skill(
        &self,
        score: &SkillScore,
        check: Option<CheckType>,
        aptitude: Option<Aptitude>,
    ) -> i64 {
        skills::resolve(score, check, aptitude, &self.aptitude)
    }

    pub fn unique_skill_score(&self, star_level: u32, skill_level: u32) -> i64 {
        self.unique.score(star_level, skill_level)
    }

    pub fn aggregate(
        &self,
        stat_scores: &[i64],
        skill_scores: &[i64],
        unique_skill_score: i64,
    ) -> ScoreSummary {
        overall::aggregate(stat_scores, skill_scores, unique_skill_score)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        match Scorer::new(&Config::default()) {
            Ok(scorer) => scorer,
            Err(e) => unreachable!("embedded scoring tables are valid: {}", e),
        }
    }
}
