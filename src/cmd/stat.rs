use crate::reports;
use clap::Args;
use umacalc::config::Config;
use umacalc::scorer::stats::StatValue;
use umacalc::scorer::Scorer;

#[derive(Args, Debug, Clone)]
pub struct StatArgs {
    #[command(flatten)]
    pub config: Config,

    /// Raw stat values; anything unparseable counts as 0
    #[arg(required = true, allow_negative_numbers = true)]
    pub values: Vec<String>,
}

pub fn run(args: StatArgs, scorer: &Scorer) {
    let rows: Vec<(StatValue, String, i64)> = args
        .values
        .iter()
        .map(|raw| {
            let value = StatValue::from_input(raw);
            (value, scorer.stat_rank(value).to_string(), scorer.stat_score(value))
        })
        .collect();
    reports::print_stat_values(&rows);
}
