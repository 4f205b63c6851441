use crate::reports;
use clap::Args;
use umacalc::library::{SkillColor, SkillLibrary};

#[derive(Args, Debug, Clone)]
pub struct SkillsArgs {
    /// Only list this color
    #[arg(short, long)]
    pub color: Option<SkillColor>,
}

pub fn run(args: SkillsArgs, library: &SkillLibrary) {
    let colors: Vec<SkillColor> = match args.color {
        Some(c) => vec![c],
        None => library.colors().collect(),
    };
    for color in colors {
        reports::print_skill_list(color, &library.sorted(color));
    }
    println!("\n📚 {} skills loaded", library.len());
}
