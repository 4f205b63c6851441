pub mod layout;
pub mod loader;
pub mod tsv;
pub mod validate;

use crate::scorer::aptitude::CheckType;
use crate::scorer::skills::{ScoreTable, SkillScore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SkillColor {
    Ius,
    Golden,
    Yellow,
    Red,
    Green,
    Blue,
    Purple,
}

impl SkillColor {
    /// Purple skills are debuffs and legitimately score below zero.
    pub fn allows_negative(self) -> bool {
        self == SkillColor::Purple
    }

    /// IUS skills carry a single flat value instead of a rating table.
    pub fn uses_flat_score(self) -> bool {
        self == SkillColor::Ius
    }
}

/// One skill of the reference library, as stored in the color files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, alias = "check-type", skip_serializing_if = "Option::is_none")]
    pub check_type: Option<String>,
    #[serde(default)]
    pub score: SkillScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SkillEntry {
    pub fn new(name: &str, check_type: Option<&str>, score: SkillScore) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            rarity: None,
            updated: None,
            check_type: check_type.map(str::to_string),
            score,
            description: None,
        }
    }

    /// Parsed check type; `None` when missing, empty or unrecognised.
    pub fn check(&self) -> Option<CheckType> {
        self.check_type.as_deref().and_then(CheckType::parse)
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Lowercase name with whitespace runs collapsed to '-'.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// All skills, grouped by color in file order.
#[derive(Debug, Clone, Default)]
pub struct SkillLibrary {
    groups: BTreeMap<SkillColor, Vec<SkillEntry>>,
}

impl SkillLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, color: SkillColor, skills: Vec<SkillEntry>) {
        self.groups.insert(color, skills);
    }

    pub fn skills(&self, color: SkillColor) -> &[SkillEntry] {
        self.groups.get(&color).map_or(&[], Vec::as_slice)
    }

    pub fn colors(&self) -> impl Iterator<Item = SkillColor> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a skill by display name (case-insensitive) or by slug.
    pub fn find(&self, color: SkillColor, name: &str) -> Option<&SkillEntry> {
        let wanted = slugify(name);
        self.skills(color).iter().find(|s| s.slug() == wanted)
    }

    /// Skills of one color in case-insensitive alphabetical order.
    pub fn sorted(&self, color: SkillColor) -> Vec<&SkillEntry> {
        let mut skills: Vec<&SkillEntry> = self.skills(color).iter().collect();
        skills.sort_by_key(|s| s.name.to_lowercase());
        skills
    }

    /// Built-in three-per-color set used when no data files can be read.
    pub fn fallback() -> Self {
        fn tiered(good: i64, average: i64, bad: i64, terrible: i64) -> SkillScore {
            SkillScore::Table(ScoreTable {
                base: Some(good),
                good: Some(good),
                average: Some(average),
                bad: Some(bad),
                terrible: Some(terrible),
            })
        }

        let mut lib = Self::new();
        let data: [(SkillColor, [(&str, &str, SkillScore); 3]); 7] = [
            (
                SkillColor::Golden,
                [
                    ("Swinging Maestro", "Late", tiered(508, 415, 369, 323)),
                    ("Professor of Curvature", "Medium", tiered(508, 415, 369, 323)),
                    ("Concentration", "End", tiered(508, 415, 369, 323)),
                ],
            ),
            (
                SkillColor::Yellow,
                [
                    ("Groundwork", "Front", tiered(217, 177, 158, 138)),
                    ("Pace Chaser Straightaways", "Pace", tiered(432, 354, 314, 275)),
                    ("Corner Recovery", "Late", tiered(217, 177, 158, 138)),
                ],
            ),
            (
                SkillColor::Red,
                [
                    ("Tether", "Late", tiered(79, 65, 58, 50)),
                    ("Escape", "Pace", tiered(183, 150, 133, 116)),
                    ("Last Spurt", "End", tiered(217, 177, 158, 138)),
                ],
            ),
            (
                SkillColor::Green,
                [
                    ("Summer Runner", "Turf", tiered(320, 262, 233, 204)),
                    ("Winter Runner", "Dirt", tiered(174, 142, 127, 111)),
                    ("Corner Specialist", "Late", tiered(174, 142, 127, 111)),
                ],
            ),
            (
                SkillColor::Blue,
                [
                    ("Lay Low", "Front", tiered(217, 177, 158, 138)),
                    ("Hide and Seek", "Pace", tiered(217, 177, 158, 138)),
                    ("Stealth Mode", "Late", tiered(195, 159, 142, 124)),
                ],
            ),
            (
                SkillColor::Purple,
                [
                    ("Mental Power", "End", tiered(-129, -105, -94, -82)),
                    ("Focus Training", "Late", tiered(-262, -214, -190, -167)),
                    ("Mind Control", "Front", tiered(-129, -105, -94, -82)),
                ],
            ),
            (
                SkillColor::Ius,
                [
                    ("IUS Speed Boost", "Pace", tiered(600, 491, 436, 382)),
                    ("IUS Stamina", "End", tiered(620, 507, 451, 395)),
                    ("IUS Intelligence", "Late", tiered(580, 474, 422, 369)),
                ],
            ),
        ];

        for (color, skills) in data {
            let entries = skills
                .into_iter()
                .map(|(name, check, score)| SkillEntry::new(name, Some(check), score))
                .collect();
            lib.insert(color, entries);
        }
        lib
    }
}

pub fn all_colors() -> impl Iterator<Item = SkillColor> {
    SkillColor::iter()
}
