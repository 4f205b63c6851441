//! Conversion between the single-file legacy library and the per-color
//! index layout.

use super::loader::{load_color_file, load_legacy, write_color_file, IndexFile, SkillIndex};
use super::tsv::skill_id;
use super::{all_colors, SkillColor, SkillEntry};
use crate::error::UcResult;
use crate::scorer::skills::SkillScore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

pub const INDEX_VERSION: &str = "2.0";
pub const COLOR_DIR: &str = "skills";

#[derive(Debug, Clone)]
pub struct SplitOutcome {
    pub index: SkillIndex,
    pub counts: Vec<(SkillColor, usize)>,
}

impl SplitOutcome {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub counts: Vec<(SkillColor, usize)>,
    pub backup: Option<PathBuf>,
}

impl MergeOutcome {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Legacy entries carry only these three keys.
#[derive(Debug, Serialize)]
struct LegacySkill<'a> {
    name: &'a str,
    #[serde(rename = "check-type", skip_serializing_if = "Option::is_none")]
    check_type: Option<&'a str>,
    score: &'a SkillScore,
}

/// Rewrites a legacy skill as an indexed entry: id by position, rarity from
/// the color, and the stamp when one is given.
fn indexed_entry(color: SkillColor, position: usize, skill: &SkillEntry, stamp: Option<&str>) -> SkillEntry {
    SkillEntry {
        id: Some(skill_id(color, position as u32 + 1)),
        name: skill.name.clone(),
        rarity: Some(color.to_string()),
        updated: stamp.map(str::to_string).or_else(|| skill.updated.clone()),
        check_type: skill
            .check_type
            .clone()
            .filter(|c| !c.trim().is_empty()),
        score: skill.score,
        description: Some(skill.description.clone().unwrap_or_default()),
    }
}

/// Splits `legacy_path` into one file per color under `skills/` beside
/// `index_path`, then writes the index itself. Colors absent from the
/// legacy file are left out of the index.
pub fn split_legacy<P: AsRef<Path>, Q: AsRef<Path>>(
    legacy_path: P,
    index_path: Q,
    stamp: Option<&str>,
) -> UcResult<SplitOutcome> {
    let legacy_path = legacy_path.as_ref();
    let index_path = index_path.as_ref();
    let lib = load_legacy(legacy_path)?;
    info!("Splitting {} skills from {}", lib.len(), legacy_path.display());

    let base = index_path.parent().unwrap_or_else(|| Path::new(""));
    fs::create_dir_all(base.join(COLOR_DIR))?;

    let mut colors = Vec::new();
    let mut files = BTreeMap::new();
    let mut counts = Vec::new();
    for color in all_colors() {
        if !lib.colors().any(|c| c == color) {
            warn!("No {} skills in {}, skipping", color, legacy_path.display());
            continue;
        }
        let skills: Vec<SkillEntry> = lib
            .skills(color)
            .iter()
            .enumerate()
            .map(|(i, s)| indexed_entry(color, i, s, stamp))
            .collect();

        let relative = format!("{}/{}.json", COLOR_DIR, color);
        write_color_file(base.join(&relative), &skills)?;
        debug!("Wrote {} {} skills to {}", skills.len(), color, relative);

        colors.push(color.to_string());
        files.insert(color.to_string(), IndexFile::Path(relative));
        counts.push((color, skills.len()));
    }

    let index = SkillIndex {
        version: INDEX_VERSION.to_string(),
        updated: stamp.map(str::to_string),
        description: Some("Skill library, one file per color".to_string()),
        colors,
        files,
    };
    fs::write(index_path, serde_json::to_string_pretty(&index)? + "\n")?;
    info!("Wrote index {}", index_path.display());

    Ok(SplitOutcome { index, counts })
}

/// Copies an existing file to `<file>.backup.<unix seconds>`.
pub fn backup_file(path: &Path) -> UcResult<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".backup.{}", secs));
    let backup = PathBuf::from(name);
    fs::copy(path, &backup)?;
    info!("Backed up {} to {}", path.display(), backup.display());
    Ok(Some(backup))
}

/// Collects every color listed in the index into one legacy file at
/// `out_path`. Colors whose file is missing are skipped with a warning. An
/// existing `out_path` is backed up first when `backup` is set.
pub fn merge_to_legacy<P: AsRef<Path>, Q: AsRef<Path>>(
    index_path: P,
    out_path: Q,
    backup: bool,
) -> UcResult<MergeOutcome> {
    let index_path = index_path.as_ref();
    let out_path = out_path.as_ref();
    let index = SkillIndex::load_from_file(index_path)?;

    let mut loaded: Vec<(SkillColor, Vec<SkillEntry>)> = Vec::new();
    for name in &index.colors {
        let Ok(color) = name.parse::<SkillColor>() else {
            warn!("Index lists unknown color '{}', skipping", name);
            continue;
        };
        let Some(path) = index.color_path(index_path, color) else {
            warn!("Index has no file entry for {}", color);
            continue;
        };
        if !path.exists() {
            warn!("Missing {} file {}, skipping", color, path.display());
            continue;
        }
        loaded.push((color, load_color_file(&path)?));
    }

    let merged: BTreeMap<String, Vec<LegacySkill>> = loaded
        .iter()
        .map(|(color, skills)| {
            let entries = skills
                .iter()
                .map(|s| LegacySkill {
                    name: &s.name,
                    check_type: s.check_type.as_deref().filter(|c| !c.trim().is_empty()),
                    score: &s.score,
                })
                .collect();
            (color.to_string(), entries)
        })
        .collect();

    let backup = if backup { backup_file(out_path)? } else { None };
    fs::write(out_path, serde_json::to_string_pretty(&merged)? + "\n")?;
    info!("Wrote legacy library {}", out_path.display());

    Ok(MergeOutcome {
        counts: loaded.iter().map(|(c, s)| (*c, s.len())).collect(),
        backup,
    })
}
