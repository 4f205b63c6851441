use rstest::rstest;
use umacalc::config::{AptitudeWeights, Config};
use umacalc::scorer::aptitude::{Aptitude, AptitudeMultipliers, CheckType};
use umacalc::scorer::overall::OverallRating;
use umacalc::scorer::skills::{ScoreTable, SkillScore};
use umacalc::scorer::stats::{rate, StatValue};
use umacalc::scorer::{NextRating, Scorer};

fn table(good: i64, average: i64, bad: i64, terrible: i64) -> SkillScore {
    SkillScore::Table(ScoreTable {
        base: Some(good),
        good: Some(good),
        average: Some(average),
        bad: Some(bad),
        terrible: Some(terrible),
    })
}

// --- STAT SCORE ---

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(50, 25)]
#[case(100, 66)]
#[case(400, 577)]
#[case(600, 1143)]
#[case(900, 2209)]
#[case(1100, 3171)]
#[case(1200, 3841)]
#[case(1300, 4531)] // past the table: last multiplier repeats
#[case(2000, 9361)]
fn test_stat_score_default_table(#[case] stat: u32, #[case] expected: i64) {
    let scorer = Scorer::default();
    assert_eq!(scorer.stat_score(StatValue::new(stat)), expected);
}

#[test]
fn test_custom_block_size() {
    let mut config = Config::default();
    config.stats.stat_block_size = 100;
    config.stats.stat_multipliers = "1,2".to_string();
    let scorer = Scorer::new(&config).unwrap();
    // 100 * 1 + 2 * (50 + 1)
    assert_eq!(scorer.stat_score(StatValue::new(150)), 202);
}

#[test]
fn test_bad_tables_fail_construction() {
    let mut config = Config::default();
    config.stats.stat_multipliers = "1,x".to_string();
    assert!(Scorer::new(&config).is_err());

    let mut config = Config::default();
    config.stats.stat_block_size = 0;
    assert!(Scorer::new(&config).is_err());
}

// --- STAT RANK ---

#[rstest]
#[case(0, "G")]
#[case(1, "G")]
#[case(50, "G")]
#[case(51, "G⁺")]
#[case(100, "F")]
#[case(399, "D⁺")]
#[case(400, "C")]
#[case(999, "A⁺")]
#[case(1000, "S")]
#[case(1150, "SS⁺")]
#[case(1200, "SS⁺")]
#[case(1201, "UG1")]
#[case(1255, "UG6")]
#[case(1901, "US1")]
#[case(2000, "US9")]
#[case(2001, "G")]
fn test_stat_rank(#[case] stat: u32, #[case] expected: &str) {
    assert_eq!(rate(StatValue::new(stat)).to_string(), expected);
}

#[rstest]
#[case("abc")]
#[case("")]
#[case("-12")]
fn test_non_numeric_rank_is_g(#[case] raw: &str) {
    assert_eq!(rate(StatValue::from_input(raw)).to_string(), "G");
}

// --- APTITUDE ---

#[rstest]
#[case(Aptitude::SA, 1.0)]
#[case(Aptitude::BC, 0.8)]
#[case(Aptitude::DEF, 0.6)]
#[case(Aptitude::G, 0.5)]
fn test_aptitude_multiplier(#[case] aptitude: Aptitude, #[case] expected: f64) {
    assert_eq!(Scorer::default().aptitude_multiplier(aptitude), expected);
}

#[rstest]
#[case("B-C", 0.8)]
#[case("b", 0.8)]
#[case("E", 0.6)]
#[case("S", 1.0)]
#[case("g", 0.5)]
#[case("Z", 1.0)]
#[case("", 1.0)]
fn test_multiplier_by_label(#[case] label: &str, #[case] expected: f64) {
    let m = AptitudeMultipliers::from(&AptitudeWeights::default());
    assert_eq!(m.multiplier_for_label(label), expected);
}

// --- SKILL RESOLUTION ---

#[rstest]
#[case(Aptitude::SA, 217)]
#[case(Aptitude::BC, 142)] // round(177 * 0.8)
#[case(Aptitude::DEF, 95)] // round(158 * 0.6)
#[case(Aptitude::G, 69)] // round(138 * 0.5)
fn test_resolve_tiered(#[case] aptitude: Aptitude, #[case] expected: i64) {
    let scorer = Scorer::default();
    let score = table(217, 177, 158, 138);
    assert_eq!(
        scorer.resolve_skill(&score, Some(CheckType::Late), Some(aptitude)),
        expected
    );
}

#[test]
fn test_resolve_flat_and_unchecked() {
    let scorer = Scorer::default();
    assert_eq!(
        scorer.resolve_skill(&SkillScore::Flat(600), Some(CheckType::Pace), Some(Aptitude::G)),
        600
    );
    assert_eq!(
        scorer.resolve_skill(&table(217, 177, 158, 138), None, Some(Aptitude::G)),
        217
    );
}

// --- UNIQUE SKILL ---

#[rstest]
#[case(1, 1, 120)]
#[case(2, 3, 360)]
#[case(3, 3, 510)]
#[case(5, 6, 1020)]
#[case(3, 0, 0)]
fn test_unique_skill(#[case] star: u32, #[case] level: u32, #[case] expected: i64) {
    assert_eq!(Scorer::default().unique_skill_score(star, level), expected);
}

// --- AGGREGATE ---

#[test]
fn test_aggregate_example() {
    let summary = Scorer::default().aggregate(&[100, 200], &[50], 120);
    assert_eq!(summary.total_stats_score, 300);
    assert_eq!(summary.total_skill_score, 50);
    assert_eq!(summary.unique_skill_score, 120);
    assert_eq!(summary.overall_score, 470);
    assert_eq!(summary.overall_rating, OverallRating::GPlus);
    assert_eq!(summary.points_to_next, NextRating::Points(130));
}

#[rstest]
#[case(0, "G", NextRating::Points(300))]
#[case(299, "G", NextRating::Points(1))]
#[case(300, "G+", NextRating::Points(300))]
#[case(10000, "A", NextRating::Points(2100))]
#[case(19199, "SS", NextRating::Points(1))]
#[case(19200, "SS+", NextRating::Max)]
#[case(-250, "G", NextRating::Points(550))]
fn test_overall_bands(#[case] overall: i64, #[case] rating: &str, #[case] next: NextRating) {
    let summary = Scorer::default().aggregate(&[overall], &[], 0);
    assert_eq!(summary.overall_rating.to_string(), rating);
    assert_eq!(summary.points_to_next, next);
}

#[test]
fn test_summary_json_shape() {
    let summary = Scorer::default().aggregate(&[19000], &[500], 0);
    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["overall_rating"], "SS+");
    assert_eq!(json["points_to_next"], "MAX");

    let summary = Scorer::default().aggregate(&[100], &[], 0);
    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["overall_rating"], "G");
    assert_eq!(json["points_to_next"], 200);
}
