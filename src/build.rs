use crate::error::UcResult;
use crate::library::loader::{AptitudePresets, CharacterRecord};
use crate::library::{SkillColor, SkillLibrary};
use crate::scorer::aptitude::{Aptitude, AptitudeProfile, CheckType};
use crate::scorer::stats::{StatRank, StatValue};
use crate::scorer::{ScoreSummary, Scorer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

pub const DEFAULT_STAR_LEVEL: u32 = 3;
pub const DEFAULT_UNIQUE_LEVEL: u32 = 1;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Speed,
    Stamina,
    Power,
    Guts,
    Wit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatLine {
    pub speed: StatValue,
    pub stamina: StatValue,
    pub power: StatValue,
    pub guts: StatValue,
    pub wit: StatValue,
}

impl StatLine {
    pub fn get(&self, kind: StatKind) -> StatValue {
        match kind {
            StatKind::Speed => self.speed,
            StatKind::Stamina => self.stamina,
            StatKind::Power => self.power,
            StatKind::Guts => self.guts,
            StatKind::Wit => self.wit,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: StatValue) {
        match kind {
            StatKind::Speed => self.speed = value,
            StatKind::Stamina => self.stamina = value,
            StatKind::Power => self.power = value,
            StatKind::Guts => self.guts = value,
            StatKind::Wit => self.wit = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, StatValue)> + '_ {
        StatKind::iter().map(move |k| (k, self.get(k)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPick {
    pub color: SkillColor,
    pub name: String,
}

impl SkillPick {
    pub fn new(color: SkillColor, name: &str) -> Self {
        Self {
            color,
            name: name.to_string(),
        }
    }
}

/// Everything a user enters. Derived scores are never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    pub stats: StatLine,
    pub aptitudes: AptitudeProfile,
    pub skills: Vec<SkillPick>,
    #[serde(deserialize_with = "star_level_or_default")]
    pub star_level: u32,
    #[serde(deserialize_with = "unique_level_or_default")]
    pub unique_level: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Int(i64),
    Float(f64),
    Text(String),
    Null(()),
}

impl RawLevel {
    /// `None` for negatives, non-numbers and null.
    fn level(self) -> Option<u32> {
        let n = match self {
            RawLevel::Int(v) => v as f64,
            RawLevel::Float(v) => v,
            RawLevel::Text(s) => s.trim().parse::<f64>().ok()?,
            RawLevel::Null(()) => return None,
        };
        if !n.is_finite() || n < 0.0 {
            return None;
        }
        Some(n.min(u32::MAX as f64) as u32)
    }
}

fn level_or<'de, D: Deserializer<'de>>(deserializer: D, fallback: u32, field: &str) -> Result<u32, D::Error> {
    let raw = RawLevel::deserialize(deserializer)?;
    Ok(raw.level().unwrap_or_else(|| {
        warn!("Invalid {} in build, using {}", field, fallback);
        fallback
    }))
}

fn star_level_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    level_or(deserializer, DEFAULT_STAR_LEVEL, "star_level")
}

fn unique_level_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    level_or(deserializer, DEFAULT_UNIQUE_LEVEL, "unique_level")
}

impl Default for Build {
    fn default() -> Self {
        Self {
            character: None,
            stats: StatLine::default(),
            aptitudes: AptitudeProfile::default(),
            skills: Vec::new(),
            star_level: DEFAULT_STAR_LEVEL,
            unique_level: DEFAULT_UNIQUE_LEVEL,
        }
    }
}

impl Build {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> UcResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> UcResult<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Selects a character: star level from the roster (1 when the record
    /// has none) and aptitudes from the presets when a profile exists.
    pub fn apply_character(&mut self, record: &CharacterRecord, presets: &AptitudePresets) {
        self.character = Some(record.id.clone());
        self.star_level = record.default_star.unwrap_or(1);
        match presets.lookup(&record.name) {
            Some(profile) => self.aptitudes = *profile,
            None => warn!("No aptitudes found for: {}", record.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatRow {
    pub kind: StatKind,
    pub value: StatValue,
    pub rank: StatRank,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRow {
    pub color: SkillColor,
    pub name: String,
    pub check_type: Option<CheckType>,
    pub aptitude: Option<Aptitude>,
    pub score: i64,
    // false when the pick is not in the library; such rows score zero
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub stats: Vec<StatRow>,
    pub skills: Vec<SkillRow>,
    pub summary: ScoreSummary,
    /// Name of the selected character's unique skill, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_skill: Option<String>,
}

fn evaluate_skill(scorer: &Scorer, library: &SkillLibrary, build: &Build, pick: &SkillPick) -> SkillRow {
    let Some(entry) = library.find(pick.color, &pick.name) else {
        warn!("Skill '{}' not found in {} skills", pick.name, pick.color);
        return SkillRow {
            color: pick.color,
            name: pick.name.clone(),
            check_type: None,
            aptitude: None,
            score: 0,
            matched: false,
        };
    };

    let check = entry.check();
    let raw_check = entry.check_type.as_deref().filter(|c| !c.trim().is_empty());
    if let (None, Some(raw)) = (check, raw_check) {
        warn!("Unknown check-type '{}' on {}", raw, entry.name);
    }
    let aptitude = check.map(|c| build.aptitudes.get(c));
    let score = scorer.resolve_skill(&entry.score, check, aptitude);
    debug!(
        "Skill: {}, Check-Type: {:?}, Aptitude: {:?}, Score: {}",
        entry.name, check, aptitude, score
    );

    SkillRow {
        color: pick.color,
        name: entry.name.clone(),
        check_type: check,
        aptitude,
        score,
        matched: true,
    }
}

/// Recomputes every derived value of a build from scratch.
pub fn evaluate(scorer: &Scorer, library: &SkillLibrary, build: &Build) -> BuildReport {
    let stats: Vec<StatRow> = build
        .stats
        .iter()
        .map(|(kind, value)| StatRow {
            kind,
            value,
            rank: scorer.stat_rank(value),
            score: scorer.stat_score(value),
        })
        .collect();

    let skills: Vec<SkillRow> = build
        .skills
        .iter()
        .map(|pick| evaluate_skill(scorer, library, build, pick))
        .collect();

    let unique = scorer.unique_skill_score(build.star_level, build.unique_level);

    let stat_scores: Vec<i64> = stats.iter().map(|r| r.score).collect();
    let skill_scores: Vec<i64> = skills.iter().map(|r| r.score).collect();
    let summary = scorer.aggregate(&stat_scores, &skill_scores, unique);
    debug!(
        "Overall: {} ({}) = stats {} + skills {} + unique {}",
        summary.overall_score,
        summary.overall_rating,
        summary.total_stats_score,
        summary.total_skill_score,
        summary.unique_skill_score
    );

    BuildReport {
        stats,
        skills,
        summary,
        unique_skill: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults_from_partial_json() {
        let build: Build = serde_json::from_str(r#"{ "stats": { "speed": "900" } }"#).unwrap();
        assert_eq!(build.stats.speed, StatValue::new(900));
        assert_eq!(build.stats.wit, StatValue::ZERO);
        assert_eq!(build.star_level, DEFAULT_STAR_LEVEL);
        assert_eq!(build.unique_level, DEFAULT_UNIQUE_LEVEL);
        assert!(build.skills.is_empty());
    }

    #[test]
    fn test_levels_accept_text_and_reject_junk() {
        let build: Build = serde_json::from_str(
            r#"{ "stats": { "speed": "900" }, "star_level": "4", "unique_level": -1 }"#,
        )
        .unwrap();
        assert_eq!(build.stats.speed, StatValue::new(900));
        assert_eq!(build.star_level, 4);
        assert_eq!(build.unique_level, DEFAULT_UNIQUE_LEVEL);

        let build: Build =
            serde_json::from_str(r#"{ "star_level": "five", "unique_level": 3.7 }"#).unwrap();
        assert_eq!(build.star_level, DEFAULT_STAR_LEVEL);
        assert_eq!(build.unique_level, 3);

        let build: Build =
            serde_json::from_str(r#"{ "star_level": null, "unique_level": " 5 " }"#).unwrap();
        assert_eq!(build.star_level, DEFAULT_STAR_LEVEL);
        assert_eq!(build.unique_level, 5);
    }

    #[test]
    fn test_stat_line_order() {
        let mut line = StatLine::default();
        line.set(StatKind::Guts, StatValue::new(400));
        let kinds: Vec<StatKind> = line.iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                StatKind::Speed,
                StatKind::Stamina,
                StatKind::Power,
                StatKind::Guts,
                StatKind::Wit
            ]
        );
        assert_eq!(line.get(StatKind::Guts), StatValue::new(400));
    }

    #[test]
    fn test_unknown_pick_scores_zero() {
        let scorer = Scorer::default();
        let lib = SkillLibrary::fallback();
        let mut build = Build::default();
        build.skills.push(SkillPick::new(SkillColor::Red, "No Such Skill"));
        let report = evaluate(&scorer, &lib, &build);
        assert_eq!(report.skills.len(), 1);
        assert!(!report.skills[0].matched);
        assert_eq!(report.summary.total_skill_score, 0);
    }
}
