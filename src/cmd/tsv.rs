use super::DataPaths;
use crate::reports;
use clap::Args;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;
use umacalc::error::{UcResult, UmaCalcError};
use umacalc::library::loader::{load_color_file, write_color_file, SkillIndex};
use umacalc::library::tsv::{merge_rows, read_tsv, write_tsv, ImportMode};
use umacalc::library::SkillColor;

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Tab-separated sheet with a header row
    pub tsv: String,

    #[arg(short, long)]
    pub color: SkillColor,

    /// update, replace or add
    #[arg(short, long, default_value = "update")]
    pub mode: ImportMode,

    /// Date string written into `updated` on touched skills
    #[arg(long)]
    pub stamp: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[arg(short, long)]
    pub color: SkillColor,

    #[arg(short, long)]
    pub out: String,
}

fn color_file(paths: &DataPaths, color: SkillColor) -> UcResult<PathBuf> {
    let index_path = Path::new(&paths.skills);
    let index = SkillIndex::load_from_file(index_path)?;
    index
        .color_path(index_path, color)
        .ok_or_else(|| UmaCalcError::Validation(format!("Index has no file for color '{}'", color)))
}

pub fn run_import(args: ImportArgs, paths: &DataPaths) -> UcResult<()> {
    let target = color_file(paths, args.color)?;
    let rows = read_tsv(File::open(&args.tsv)?)?;
    info!("📥 {} rows read from {}", rows.len(), args.tsv);

    let existing = if args.mode != ImportMode::Replace && target.exists() {
        load_color_file(&target)?
    } else {
        Vec::new()
    };

    let outcome = merge_rows(existing, &rows, args.color, args.mode, args.stamp.as_deref());
    write_color_file(&target, &outcome.skills)?;
    reports::print_import_summary(args.color, args.mode, &outcome);
    info!("💾 Wrote {}", target.display());
    Ok(())
}

pub fn run_export(args: ExportArgs, paths: &DataPaths) -> UcResult<()> {
    let source = color_file(paths, args.color)?;
    let skills = load_color_file(&source)?;
    write_tsv(File::create(&args.out)?, &skills)?;
    println!("📤 Exported {} {} skills to {}", skills.len(), args.color, args.out);
    Ok(())
}
