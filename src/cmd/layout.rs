use super::DataPaths;
use crate::reports;
use clap::Args;
use std::path::{Path, PathBuf};
use umacalc::error::UcResult;
use umacalc::library::layout::{merge_to_legacy, split_legacy};
use umacalc::library::loader::LEGACY_LIBRARY_FILE;

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Legacy library to split; defaults to skills_lib.json beside the index
    #[arg(short, long)]
    pub legacy: Option<String>,

    /// Date string written into `updated` on the index and every skill
    #[arg(long)]
    pub stamp: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Output file; defaults to skills_lib.json beside the index
    #[arg(short, long)]
    pub out: Option<String>,

    /// Overwrite the output without keeping a backup copy
    #[arg(long, default_value_t = false)]
    pub no_backup: bool,
}

fn legacy_path(paths: &DataPaths, given: &Option<String>) -> PathBuf {
    match given {
        Some(p) => PathBuf::from(p),
        None => Path::new(&paths.skills)
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(LEGACY_LIBRARY_FILE),
    }
}

pub fn run_split(args: SplitArgs, paths: &DataPaths) -> UcResult<()> {
    let source = legacy_path(paths, &args.legacy);
    let outcome = split_legacy(&source, &paths.skills, args.stamp.as_deref())?;
    reports::print_layout_counts("Split", &outcome.counts, outcome.total());
    println!("🗂️  Index written to {}", paths.skills);
    Ok(())
}

pub fn run_merge(args: MergeArgs, paths: &DataPaths) -> UcResult<()> {
    let target = legacy_path(paths, &args.out);
    let outcome = merge_to_legacy(&paths.skills, &target, !args.no_backup)?;
    reports::print_layout_counts("Merged", &outcome.counts, outcome.total());
    if let Some(backup) = &outcome.backup {
        println!("💾 Previous file kept as {}", backup.display());
    }
    println!("📦 Legacy library written to {}", target.display());
    Ok(())
}
