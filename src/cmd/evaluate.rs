use super::DataPaths;
use crate::reports;
use clap::Args;
use tracing::{info, warn};
use umacalc::build::{self, Build};
use umacalc::config::Config;
use umacalc::error::UcResult;
use umacalc::library::loader::{AptitudePresets, CharacterRoster};
use umacalc::library::SkillLibrary;
use umacalc::scorer::Scorer;

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Build snapshot (JSON) to score
    #[arg(short, long)]
    pub build: Option<String>,

    /// Character id or name; sets star level and aptitudes
    #[arg(short, long)]
    pub uma: Option<String>,

    #[arg(long)]
    pub star: Option<u32>,

    #[arg(long)]
    pub unique_level: Option<u32>,

    /// Print the report as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write the resulting build snapshot here
    #[arg(long)]
    pub save: Option<String>,
}

fn load_presets(path: &str) -> AptitudePresets {
    match AptitudePresets::load_from_file(path) {
        Ok(presets) => presets,
        Err(e) => {
            warn!("Could not load aptitudes from {}: {}", path, e);
            AptitudePresets::default()
        }
    }
}

pub fn run(args: EvaluateArgs, scorer: &Scorer, library: &SkillLibrary, paths: &DataPaths) -> UcResult<()> {
    let mut build = match &args.build {
        Some(path) => {
            info!("📂 Loading build: {}", path);
            Build::load_from_file(path)?
        }
        None => Build::default(),
    };

    let mut unique_skill = None;
    if let Some(key) = &args.uma {
        let roster = CharacterRoster::load_from_file(&paths.roster)?;
        let record = roster.require(key)?;
        let presets = load_presets(&paths.aptitudes);
        build.apply_character(record, &presets);
        info!("🐎 Character: {} ({}★)", record.name, build.star_level);
        unique_skill = record.unique_skill().map(str::to_string);
        if unique_skill.is_none() {
            warn!("No unique skill listed for {}", record.name);
        }
    }
    if let Some(star) = args.star {
        build.star_level = star;
    }
    if let Some(level) = args.unique_level {
        build.unique_level = level;
    }

    let mut report = build::evaluate(scorer, library, &build);
    report.unique_skill = unique_skill;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        reports::print_build_report(&report);
    }

    if let Some(path) = &args.save {
        build.save_to_file(path)?;
        info!("💾 Build saved to {}", path);
    }
    Ok(())
}
