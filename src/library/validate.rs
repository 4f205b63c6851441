use super::loader::SkillIndex;
use super::tsv::skill_id;
use super::{all_colors, SkillColor};
use crate::scorer::aptitude::CheckType;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const REQUIRED_FIELDS: [&str; 4] = ["id", "name", "rarity", "score"];
const TABLE_KEYS: [&str; 5] = ["base", "good", "average", "bad", "terrible"];

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub skills_checked: usize,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    fn error(&mut self, msg: String) {
        debug!("error: {}", msg);
        self.errors.push(msg);
    }

    fn warning(&mut self, msg: String) {
        debug!("warning: {}", msg);
        self.warnings.push(msg);
    }

    /// Checks one raw skill object at `index` of its color file.
    pub fn check_skill(&mut self, skill: &Value, color: SkillColor, index: usize) {
        self.skills_checked += 1;
        let label = skill
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(|| format!("{}_{}", color, index), str::to_string);

        for field in REQUIRED_FIELDS {
            if skill.get(field).is_none() {
                self.error(format!("{}: Missing required field '{}'", label, field));
            }
        }

        if let Some(id) = skill.get("id") {
            let expected = skill_id(color, index as u32 + 1);
            if id.as_str() != Some(expected.as_str()) {
                self.warning(format!("{}: ID should be '{}' but is {}", label, expected, id));
            }
        }

        if let Some(rarity) = skill.get("rarity") {
            if rarity.as_str() != Some(color.to_string().as_str()) {
                self.error(format!(
                    "{}: Rarity {} doesn't match file color '{}'",
                    label, rarity, color
                ));
            }
        }

        let check_type = skill
            .get("check_type")
            .or_else(|| skill.get("check-type"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());
        if let Some(check) = check_type {
            if CheckType::from_str(check).is_err() {
                self.warning(format!("{}: Unknown check_type '{}'", label, check));
            }
        }

        match skill.get("score") {
            Some(Value::Object(table)) if !color.uses_flat_score() => {
                let missing: Vec<&str> = TABLE_KEYS
                    .iter()
                    .copied()
                    .filter(|k| !table.contains_key(*k))
                    .collect();
                if !missing.is_empty() {
                    self.warning(format!("{}: Score missing keys: {:?}", label, missing));
                }
                if !color.allows_negative() {
                    for (key, value) in table {
                        if value.as_f64().is_some_and(|v| v < 0.0) {
                            self.warning(format!(
                                "{}: Negative score value {}={}",
                                label, key, value
                            ));
                        }
                    }
                }
            }
            Some(Value::Number(_)) if !color.uses_flat_score() => {
                self.warning(format!("{}: Non-IUS skill has simple numeric score", label));
            }
            _ => {}
        }

        if let Some(name) = skill.get("name").and_then(Value::as_str) {
            if name.trim().is_empty() {
                self.error(format!("{}: Empty skill name", label));
            }
        }
    }

    /// Checks a parsed color file: must be an array; names should be unique.
    pub fn check_color_file(&mut self, content: &Value, color: SkillColor) {
        let Some(skills) = content.as_array() else {
            self.error(format!("{}.json: Root should be an array", color));
            return;
        };

        let mut names = HashSet::new();
        for (index, skill) in skills.iter().enumerate() {
            self.check_skill(skill, color, index);
            if let Some(name) = skill.get("name").and_then(Value::as_str) {
                if !names.insert(name) {
                    self.warning(format!("{}: Duplicate skill name '{}'", color, name));
                }
            }
        }
        debug!("{} {} skills checked", skills.len(), color);
    }

    pub fn check_index(&mut self, index: &SkillIndex) {
        let listed: HashSet<&str> = index.colors.iter().map(String::as_str).collect();
        let expected: Vec<String> = all_colors().map(|c| c.to_string()).collect();

        let mut missing: Vec<&str> = expected
            .iter()
            .map(String::as_str)
            .filter(|c| !listed.contains(c))
            .collect();
        missing.sort_unstable();
        if !missing.is_empty() {
            self.warning(format!("Index: Missing colors: {:?}", missing));
        }

        let mut extra: Vec<&str> = listed
            .iter()
            .copied()
            .filter(|c| !expected.iter().any(|e| e.as_str() == *c))
            .collect();
        extra.sort_unstable();
        if !extra.is_empty() {
            self.warning(format!("Index: Extra colors: {:?}", extra));
        }
    }
}

/// Validates the index and every color file it points to.
pub fn validate_library<P: AsRef<Path>>(index_path: P) -> ValidationReport {
    let index_path = index_path.as_ref();
    let mut report = ValidationReport::default();

    let index = match SkillIndex::load_from_file(index_path) {
        Ok(index) => index,
        Err(e) => {
            report.error(format!("skills_index.json: Error reading - {}", e));
            return report;
        }
    };
    report.check_index(&index);

    for color in all_colors() {
        let Some(path) = index.color_path(index_path, color) else {
            report.error(format!("Missing file: {}.json", color));
            continue;
        };
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => {
                report.error(format!("Missing file: {}", path.display()));
                continue;
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => report.check_color_file(&value, color),
            Err(e) => report.error(format!("{}.json: Invalid JSON - {}", color, e)),
        }
    }

    info!(
        "Validation finished: {} skills, {} errors, {} warnings",
        report.skills_checked,
        report.errors.len(),
        report.warnings.len()
    );
    report
}
