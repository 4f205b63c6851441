use super::{SkillColor, SkillEntry, SkillLibrary};
use crate::error::{UcResult, UmaCalcError};
use crate::scorer::aptitude::AptitudeProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

pub const LEGACY_LIBRARY_FILE: &str = "skills_lib.json";

/// `skills_index.json`: which file holds each color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillIndex {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub colors: Vec<String>,
    pub files: BTreeMap<String, IndexFile>,
}

/// A color's file reference: a bare path or `{ "file": path, ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexFile {
    Path(String),
    Entry { file: String },
}

impl IndexFile {
    pub fn path(&self) -> &str {
        match self {
            IndexFile::Path(p) => p,
            IndexFile::Entry { file } => file,
        }
    }
}

impl SkillIndex {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> UcResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Location of a color's file, resolved against the index's directory.
    pub fn color_path(&self, index_path: &Path, color: SkillColor) -> Option<PathBuf> {
        let base = index_path.parent().unwrap_or_else(|| Path::new(""));
        self.files
            .get(&color.to_string())
            .map(|f| base.join(f.path()))
    }
}

pub fn load_color_file<P: AsRef<Path>>(path: P) -> UcResult<Vec<SkillEntry>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn write_color_file<P: AsRef<Path>>(path: P, skills: &[SkillEntry]) -> UcResult<()> {
    let json = serde_json::to_string_pretty(skills)?;
    fs::write(path, json + "\n")?;
    Ok(())
}

/// Reads every color listed in the index. A color whose file is missing or
/// malformed is skipped with a warning; only an unreadable index fails.
pub fn load_from_index<P: AsRef<Path>>(index_path: P) -> UcResult<SkillLibrary> {
    let index_path = index_path.as_ref();
    let index = SkillIndex::load_from_file(index_path)?;
    info!(
        "Loading skills v{} ({})",
        index.version,
        index.updated.as_deref().unwrap_or("undated")
    );

    let mut lib = SkillLibrary::new();
    for name in &index.colors {
        let Ok(color) = SkillColor::from_str(name) else {
            warn!("Index lists unknown color '{}', skipping", name);
            continue;
        };
        let Some(path) = index.color_path(index_path, color) else {
            warn!("Index has no file entry for {}", color);
            continue;
        };
        match load_color_file(&path) {
            Ok(skills) => {
                debug!("Loaded {} {} skills from {}", skills.len(), color, path.display());
                lib.insert(color, skills);
            }
            Err(e) => warn!("Could not load {} skills from {}: {}", color, path.display(), e),
        }
    }
    Ok(lib)
}

/// Single-file `{ color: [skills] }` layout that predates the index.
pub fn load_legacy<P: AsRef<Path>>(path: P) -> UcResult<SkillLibrary> {
    let file = File::open(path)?;
    let raw: BTreeMap<String, Vec<SkillEntry>> = serde_json::from_reader(BufReader::new(file))?;

    let mut lib = SkillLibrary::new();
    for (name, skills) in raw {
        match SkillColor::from_str(&name) {
            Ok(color) => lib.insert(color, skills),
            Err(_) => warn!("Legacy library has unknown color '{}', skipping", name),
        }
    }
    Ok(lib)
}

/// Index first, then the legacy file beside it, then the built-in set.
pub fn load_library<P: AsRef<Path>>(index_path: P) -> SkillLibrary {
    let index_path = index_path.as_ref();
    let err = match load_from_index(index_path) {
        Ok(lib) => {
            info!("Skill library ready: {} skills", lib.len());
            return lib;
        }
        Err(e) => e,
    };
    warn!(
        "Could not load skill index {}: {}; trying legacy format",
        index_path.display(),
        err
    );

    let legacy = index_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(LEGACY_LIBRARY_FILE);
    match load_legacy(&legacy) {
        Ok(lib) => {
            info!("Skill library loaded from {}", legacy.display());
            lib
        }
        Err(e) => {
            warn!("Could not load {}: {}; using built-in skills", legacy.display(), e);
            SkillLibrary::fallback()
        }
    }
}

/// Per-character default aptitudes (`aptitudes.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AptitudePresets {
    #[serde(default)]
    pub aptitudes: BTreeMap<String, AptitudeProfile>,
}

impl AptitudePresets {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> UcResult<Self> {
        let file = File::open(path)?;
        let presets: Self = serde_json::from_reader(BufReader::new(file))?;
        info!("Aptitude presets loaded: {} characters", presets.aptitudes.len());
        Ok(presets)
    }

    /// Exact name first, then the name without a trailing "(Variant)".
    pub fn lookup(&self, name: &str) -> Option<&AptitudeProfile> {
        if let Some(profile) = self.aptitudes.get(name) {
            return Some(profile);
        }
        let base = base_name(name)?;
        let found = self.aptitudes.get(base);
        if found.is_some() {
            debug!("Using base name aptitudes: {} for {}", base, name);
        }
        found
    }
}

fn base_name(name: &str) -> Option<&str> {
    let trimmed = name.trim_end();
    if !trimmed.ends_with(')') {
        return None;
    }
    let open = trimmed.rfind('(')?;
    Some(trimmed[..open].trim())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_star: Option<u32>,
    #[serde(default)]
    pub unique_skills: Vec<String>,
}

impl CharacterRecord {
    /// The character's own unique skill; the first listed one.
    pub fn unique_skill(&self) -> Option<&str> {
        self.unique_skills
            .iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

/// Character list (`uma_musume.json`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterRoster {
    #[serde(default)]
    pub uma_musume: Vec<CharacterRecord>,
}

impl CharacterRoster {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> UcResult<Self> {
        let file = File::open(path)?;
        let roster: Self = serde_json::from_reader(BufReader::new(file))?;
        info!("Roster loaded: {} characters", roster.uma_musume.len());
        Ok(roster)
    }

    /// Lookup by id, falling back to a case-insensitive name match.
    pub fn find(&self, key: &str) -> Option<&CharacterRecord> {
        self.uma_musume
            .iter()
            .find(|c| c.id == key)
            .or_else(|| {
                self.uma_musume
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(key))
            })
    }

    pub fn require(&self, key: &str) -> UcResult<&CharacterRecord> {
        self.find(key)
            .ok_or_else(|| UmaCalcError::UnknownCharacter(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Gold Ship (Summer)"), Some("Gold Ship"));
        assert_eq!(base_name("Gold Ship"), None);
        assert_eq!(base_name("Odd)"), None);
    }

    #[test]
    fn test_unique_skill_is_first_listed() {
        let record: CharacterRecord = serde_json::from_str(
            r#"{ "id": "x", "name": "X", "unique_skills": ["", "Shooting Star", "Other"] }"#,
        )
        .unwrap();
        assert_eq!(record.unique_skill(), Some("Shooting Star"));

        let bare: CharacterRecord = serde_json::from_str(r#"{ "id": "y", "name": "Y" }"#).unwrap();
        assert_eq!(bare.unique_skill(), None);
    }

    #[test]
    fn test_index_file_forms() {
        let index: SkillIndex = serde_json::from_str(
            r#"{
                "version": "2.0",
                "colors": ["red", "blue"],
                "files": {
                    "red": "skills/red.json",
                    "blue": { "file": "skills/blue.json", "count": 12 }
                }
            }"#,
        )
        .unwrap();
        let root = Path::new("data/skills_index.json");
        assert_eq!(
            index.color_path(root, SkillColor::Red),
            Some(PathBuf::from("data/skills/red.json"))
        );
        assert_eq!(
            index.color_path(root, SkillColor::Blue),
            Some(PathBuf::from("data/skills/blue.json"))
        );
        assert_eq!(index.color_path(root, SkillColor::Green), None);
    }
}
