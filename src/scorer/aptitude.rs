use crate::config::AptitudeWeights;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter, EnumString};
use tracing::warn;

/// Banded aptitude tier. Legacy single-letter grades normalize into the
/// band that contains them when parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Aptitude {
    #[default]
    #[strum(to_string = "S-A", serialize = "S", serialize = "A")]
    SA,
    #[strum(to_string = "B-C", serialize = "B", serialize = "C")]
    BC,
    #[strum(to_string = "D-E-F", serialize = "D", serialize = "E", serialize = "F")]
    DEF,
    #[strum(to_string = "G")]
    G,
}

impl Aptitude {
    /// Trimmed, case-insensitive parse of either label format.
    pub fn normalize(label: &str) -> Option<Aptitude> {
        Aptitude::from_str(label.trim()).ok()
    }

    pub fn rating_level(self) -> RatingLevel {
        match self {
            Aptitude::SA => RatingLevel::Good,
            Aptitude::BC => RatingLevel::Average,
            Aptitude::DEF => RatingLevel::Bad,
            Aptitude::G => RatingLevel::Terrible,
        }
    }
}

impl Serialize for Aptitude {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Aptitude {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Aptitude::normalize(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown aptitude '{}'", s)))
    }
}

/// Score-table column picked by an aptitude band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RatingLevel {
    Good,
    Average,
    Bad,
    Terrible,
}

/// Race-style dimension a skill is checked against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, EnumCount,
)]
#[strum(ascii_case_insensitive)]
pub enum CheckType {
    Turf,
    Dirt,
    Sprint,
    Mile,
    Medium,
    Long,
    Front,
    Pace,
    Late,
    End,
}

impl CheckType {
    pub fn parse(label: &str) -> Option<CheckType> {
        CheckType::from_str(label.trim()).ok()
    }
}

impl Serialize for CheckType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CheckType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        CheckType::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown check type '{}'", s)))
    }
}

const SLOT_COUNT: usize = <CheckType as strum::EnumCount>::COUNT;

/// One aptitude per check type. Unset slots sit at S-A.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AptitudeProfile {
    slots: [Aptitude; SLOT_COUNT],
}

impl AptitudeProfile {
    pub fn get(&self, check: CheckType) -> Aptitude {
        self.slots[check as usize]
    }

    pub fn set(&mut self, check: CheckType, aptitude: Aptitude) {
        self.slots[check as usize] = aptitude;
    }

    pub fn with(mut self, check: CheckType, aptitude: Aptitude) -> Self {
        self.set(check, aptitude);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckType, Aptitude)> + '_ {
        CheckType::iter().map(move |c| (c, self.get(c)))
    }

    /// Builds a profile from loosely-typed label pairs. Unknown dimensions
    /// are ignored; unreadable grades keep the slot's default.
    pub fn from_labels<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut profile = Self::default();
        for (key, value) in pairs {
            let Some(check) = CheckType::parse(key) else {
                continue;
            };
            match Aptitude::normalize(value) {
                Some(apt) => profile.set(check, apt),
                None => warn!("Ignoring unknown aptitude '{}' for {}", value, check),
            }
        }
        profile
    }
}

impl Serialize for AptitudeProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SLOT_COUNT))?;
        for (check, apt) in self.iter() {
            map.serialize_entry(&check, &apt)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AptitudeProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(AptitudeProfile::from_labels(
            raw.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        ))
    }
}

/// Skill score multiplier per aptitude band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AptitudeMultipliers {
    pub sa: f64,
    pub bc: f64,
    pub def: f64,
    pub g: f64,
}

impl Default for AptitudeMultipliers {
    fn default() -> Self {
        Self::from(&AptitudeWeights::default())
    }
}

impl From<&AptitudeWeights> for AptitudeMultipliers {
    fn from(w: &AptitudeWeights) -> Self {
        Self {
            sa: w.aptitude_mult_sa,
            bc: w.aptitude_mult_bc,
            def: w.aptitude_mult_def,
            g: w.aptitude_mult_g,
        }
    }
}

impl AptitudeMultipliers {
    pub fn multiplier_for(&self, aptitude: Aptitude) -> f64 {
        match aptitude {
            Aptitude::SA => self.sa,
            Aptitude::BC => self.bc,
            Aptitude::DEF => self.def,
            Aptitude::G => self.g,
        }
    }

    /// Text lookup; anything unrecognised is neutral (1.0).
    pub fn multiplier_for_label(&self, label: &str) -> f64 {
        Aptitude::normalize(label).map_or(1.0, |a| self.multiplier_for(a))
    }
}
