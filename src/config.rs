use crate::error::{UcResult, UmaCalcError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_STAT_MULTIPLIERS: &str =
    "0.5,0.8,1,1.3,1.6,1.8,2.1,2.4,2.6,2.8,2.9,3,3.1,3.3,3.4,3.5,3.9,4.1,4.2,4.3,5.2,5.5,6.6,6.8,6.9";

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub stats: StatTables,
    #[command(flatten)]
    pub aptitude: AptitudeWeights,
    #[command(flatten)]
    pub unique: UniqueSkillParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatTables {
    /// Width of one scoring block, in stat points
    #[arg(long, default_value_t = 50)]
    pub stat_block_size: u32,

    /// Per-block multipliers; the last one repeats past the end of the list
    #[arg(long, default_value = DEFAULT_STAT_MULTIPLIERS)]
    pub stat_multipliers: String,
}

impl Default for StatTables {
    fn default() -> Self {
        Self {
            stat_block_size: 50,
            stat_multipliers: DEFAULT_STAT_MULTIPLIERS.to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AptitudeWeights {
    #[arg(long, default_value_t = 1.0)]
    pub aptitude_mult_sa: f64,
    #[arg(long, default_value_t = 0.8)]
    pub aptitude_mult_bc: f64,
    #[arg(long, default_value_t = 0.6)]
    pub aptitude_mult_def: f64,
    #[arg(long, default_value_t = 0.5)]
    pub aptitude_mult_g: f64,
}

impl Default for AptitudeWeights {
    fn default() -> Self {
        Self {
            aptitude_mult_sa: 1.0,
            aptitude_mult_bc: 0.8,
            aptitude_mult_def: 0.6,
            aptitude_mult_g: 0.5,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniqueSkillParams {
    /// Points per unique skill level below the high-star threshold
    #[arg(long, default_value_t = 120)]
    pub unique_low_star_points: i64,
    /// Points per unique skill level at or above the high-star threshold
    #[arg(long, default_value_t = 170)]
    pub unique_high_star_points: i64,
    #[arg(long, default_value_t = 3)]
    pub unique_high_star_min: u32,
}

impl Default for UniqueSkillParams {
    fn default() -> Self {
        Self {
            unique_low_star_points: 120,
            unique_high_star_points: 170,
            unique_high_star_min: 3,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> UcResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Copies every flag the user actually typed from `cli` onto `self`,
    /// leaving file-provided values alone where the flag was defaulted.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(stats.stat_block_size);
        update_if_present!(stats.stat_multipliers);

        update_if_present!(aptitude.aptitude_mult_sa);
        update_if_present!(aptitude.aptitude_mult_bc);
        update_if_present!(aptitude.aptitude_mult_def);
        update_if_present!(aptitude.aptitude_mult_g);

        update_if_present!(unique.unique_low_star_points);
        update_if_present!(unique.unique_high_star_points);
        update_if_present!(unique.unique_high_star_min);
    }
}

impl StatTables {
    pub fn get_multipliers(&self) -> UcResult<Vec<f64>> {
        parse_f64_list(&self.stat_multipliers, "stat_multipliers")
    }
}

fn parse_f64_list(s: &str, name: &str) -> UcResult<Vec<f64>> {
    let mut values = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let v: f64 = part.parse().map_err(|_| {
            UmaCalcError::Config(format!("Invalid number '{}' in --{}", part, name))
        })?;
        values.push(v);
    }
    if values.is_empty() {
        return Err(UmaCalcError::Config(format!(
            "--{} requires at least one value",
            name
        )));
    }
    Ok(values)
}
