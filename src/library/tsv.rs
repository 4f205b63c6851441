//! Tab-separated import/export of one color's skill list, for editing
//! score tables in a spreadsheet.
//!
//! Columns: `name, base, good, average, bad, terrible, check_type`.

use super::{SkillColor, SkillEntry};
use crate::error::UcResult;
use crate::scorer::skills::{ScoreTable, SkillScore};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::{Read, Write};
use strum_macros::{Display, EnumString};
use tracing::{debug, warn};

pub const TSV_HEADER: [&str; 7] = ["name", "base", "good", "average", "bad", "terrible", "check_type"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImportMode {
    /// Update matching names, keep the rest, append new names.
    #[default]
    Update,
    /// Rebuild the list from the TSV alone.
    Replace,
    /// Append new names only; existing entries are left as they are.
    Add,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsvRow {
    pub name: String,
    pub base: Option<i64>,
    pub good: Option<i64>,
    pub average: Option<i64>,
    pub bad: Option<i64>,
    pub terrible: Option<i64>,
    pub check_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    name: String,
    #[serde(default)]
    base: String,
    #[serde(default)]
    good: String,
    #[serde(default)]
    average: String,
    #[serde(default)]
    bad: String,
    #[serde(default)]
    terrible: String,
    #[serde(default)]
    check_type: String,
}

fn parse_cell(cell: &str) -> Result<Option<i64>, String> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse()
        .map(Some)
        .map_err(|_| format!("'{}' is not an integer", cell))
}

impl RawRow {
    fn into_row(self) -> Result<TsvRow, String> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err("empty name".to_string());
        }
        let check_type = Some(self.check_type.trim().to_string()).filter(|s| !s.is_empty());
        Ok(TsvRow {
            name,
            base: parse_cell(&self.base)?,
            good: parse_cell(&self.good)?,
            average: parse_cell(&self.average)?,
            bad: parse_cell(&self.bad)?,
            terrible: parse_cell(&self.terrible)?,
            check_type,
        })
    }
}

impl TsvRow {
    /// Only `base` set reads as a flat score; nothing set reads as zero.
    pub fn score(&self) -> SkillScore {
        let table = ScoreTable {
            base: self.base,
            good: self.good,
            average: self.average,
            bad: self.bad,
            terrible: self.terrible,
        };
        match (self.base, self.good, self.average, self.bad, self.terrible) {
            (Some(base), None, None, None, None) => SkillScore::Flat(base),
            _ if table.is_empty() => SkillScore::Flat(0),
            _ => SkillScore::Table(table),
        }
    }
}

/// Reads rows with a header line. Malformed rows are skipped with a warning.
pub fn read_tsv<R: Read>(reader: R) -> UcResult<Vec<TsvRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        // header is line 1
        let line = idx + 2;
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("TSV line {}: {}", line, e);
                continue;
            }
        };
        match raw.into_row() {
            Ok(row) => rows.push(row),
            Err(e) => warn!("TSV line {}: {}", line, e),
        }
    }
    debug!("Read {} TSV rows", rows.len());
    Ok(rows)
}

pub fn write_tsv<W: Write>(writer: W, skills: &[SkillEntry]) -> UcResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    wtr.write_record(TSV_HEADER)?;
    for skill in skills {
        let cell = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        let (base, good, average, bad, terrible) = match &skill.score {
            SkillScore::Flat(v) => (Some(*v), None, None, None, None),
            SkillScore::Table(t) => (t.base, t.good, t.average, t.bad, t.terrible),
        };
        wtr.write_record([
            skill.name.clone(),
            cell(base),
            cell(good),
            cell(average),
            cell(bad),
            cell(terrible),
            skill.check_type.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub skills: Vec<SkillEntry>,
    pub updated: usize,
    pub added: usize,
    pub kept: usize,
}

/// Highest numeric suffix among `<color>_<NNN>` ids.
fn last_id_number(skills: &[SkillEntry]) -> u32 {
    skills
        .iter()
        .filter_map(|s| s.id.as_deref())
        .filter_map(|id| id.rsplit('_').next())
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

pub fn skill_id(color: SkillColor, n: u32) -> String {
    format!("{}_{:03}", color, n)
}

fn new_entry(row: &TsvRow, color: SkillColor, id: u32, stamp: Option<&str>) -> SkillEntry {
    SkillEntry {
        id: Some(skill_id(color, id)),
        name: row.name.clone(),
        rarity: Some(color.to_string()),
        updated: stamp.map(str::to_string),
        check_type: row.check_type.clone(),
        score: row.score(),
        description: Some(String::new()),
    }
}

/// Merges TSV rows into an existing color list according to `mode`.
/// `stamp` (a date string) is written into `updated` on touched entries.
pub fn merge_rows(
    existing: Vec<SkillEntry>,
    rows: &[TsvRow],
    color: SkillColor,
    mode: ImportMode,
    stamp: Option<&str>,
) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    if mode == ImportMode::Replace {
        for (i, row) in rows.iter().enumerate() {
            outcome.skills.push(new_entry(row, color, i as u32 + 1, stamp));
        }
        outcome.added = rows.len();
        return outcome;
    }

    let mut next_id = last_id_number(&existing) + 1;
    let known: HashSet<String> = existing.iter().map(|s| s.name.clone()).collect();

    for mut skill in existing {
        let row = rows.iter().find(|r| r.name == skill.name);
        match (mode, row) {
            (ImportMode::Update, Some(row)) => {
                if row.check_type.is_some() {
                    skill.check_type = row.check_type.clone();
                }
                skill.score = row.score();
                if let Some(stamp) = stamp {
                    skill.updated = Some(stamp.to_string());
                }
                debug!("Updated: {}", skill.name);
                outcome.updated += 1;
            }
            _ => outcome.kept += 1,
        }
        outcome.skills.push(skill);
    }

    let mut seen = known;
    for row in rows {
        if seen.insert(row.name.clone()) {
            debug!("Added: {}", row.name);
            outcome.skills.push(new_entry(row, color, next_id, stamp));
            next_id += 1;
            outcome.added += 1;
        }
    }
    outcome
}
