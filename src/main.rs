use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};
use umacalc::config::Config;
use umacalc::error::UcResult;
use umacalc::library::loader::load_library;
use umacalc::scorer::Scorer;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, short, long, default_value = "data/skills_index.json")]
    skills: String,

    #[arg(global = true, long, default_value = "data/aptitudes.json")]
    aptitudes: String,

    #[arg(global = true, long, default_value = "data/uma_musume.json")]
    roster: String,

    /// JSON file overriding the scoring tables
    #[arg(global = true, long)]
    tables: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a full build
    Evaluate(cmd::evaluate::EvaluateArgs),
    /// Rank and score raw stat values
    Stat(cmd::stat::StatArgs),
    /// List the skill library
    Skills(cmd::skills::SkillsArgs),
    /// Check the skill library files for mistakes
    Validate,
    /// Merge a TSV sheet into one color's skill file
    Import(cmd::tsv::ImportArgs),
    /// Write one color's skill file as TSV
    Export(cmd::tsv::ExportArgs),
    /// Turn a single-file legacy library into the per-color index layout
    Split(cmd::layout::SplitArgs),
    /// Combine the per-color files back into one legacy library file
    Merge(cmd::layout::MergeArgs),
}

/// Tables come from the embedded defaults, or from `--tables` with any
/// explicitly typed flags layered on top.
fn resolve_config(tables: &Option<String>, cli_config: &Config, sub_matches: &ArgMatches) -> UcResult<Config> {
    let Some(path) = tables else {
        return Ok(cli_config.clone());
    };
    info!("⚖️  Loading scoring tables from: {}", path);
    let mut config = Config::load_from_file(path)?;
    config.merge_from_cli(cli_config, sub_matches);
    Ok(config)
}

fn run(cli: Cli, matches: &ArgMatches) -> UcResult<()> {
    let paths = cmd::DataPaths {
        skills: cli.skills.clone(),
        aptitudes: cli.aptitudes.clone(),
        roster: cli.roster.clone(),
    };

    match cli.command {
        Commands::Evaluate(args) => {
            let sub = matches.subcommand_matches("evaluate").unwrap_or(matches);
            let config = resolve_config(&cli.tables, &args.config, sub)?;
            let scorer = Scorer::new(&config)?;
            let library = load_library(&paths.skills);
            cmd::evaluate::run(args, &scorer, &library, &paths)
        }
        Commands::Stat(args) => {
            let sub = matches.subcommand_matches("stat").unwrap_or(matches);
            let config = resolve_config(&cli.tables, &args.config, sub)?;
            let scorer = Scorer::new(&config)?;
            cmd::stat::run(args, &scorer);
            Ok(())
        }
        Commands::Skills(args) => {
            let library = load_library(&paths.skills);
            cmd::skills::run(args, &library);
            Ok(())
        }
        Commands::Validate => cmd::validate::run(&paths),
        Commands::Import(args) => cmd::tsv::run_import(args, &paths),
        Commands::Export(args) => cmd::tsv::run_export(args, &paths),
        Commands::Split(args) => cmd::layout::run_split(args, &paths),
        Commands::Merge(args) => cmd::layout::run_merge(args, &paths),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}
