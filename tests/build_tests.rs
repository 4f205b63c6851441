use umacalc::build::{evaluate, Build, SkillPick, StatKind};
use umacalc::library::loader::{load_library, AptitudePresets, CharacterRoster};
use umacalc::library::{SkillColor, SkillLibrary};
use umacalc::scorer::aptitude::{Aptitude, CheckType};
use umacalc::scorer::overall::OverallRating;
use umacalc::scorer::stats::StatValue;
use umacalc::scorer::{NextRating, Scorer};

fn sample() -> (Scorer, SkillLibrary, Build) {
    let scorer = Scorer::default();
    let lib = load_library("data/skills_index.json");
    let build = Build::load_from_file("data/build.json").unwrap();
    (scorer, lib, build)
}

#[test]
fn test_sample_build_report() {
    let (scorer, lib, build) = sample();
    let report = evaluate(&scorer, &lib, &build);

    let stat_scores: Vec<i64> = report.stats.iter().map(|r| r.score).collect();
    assert_eq!(stat_scores, vec![3171, 1808, 2209, 577, 1143]);
    assert_eq!(report.stats[0].rank.to_string(), "SS");

    let skill_scores: Vec<i64> = report.skills.iter().map(|r| r.score).collect();
    // B on Late, G on Front, neutral End, flat IUS
    assert_eq!(skill_scores, vec![332, 69, -129, 620]);
    assert_eq!(report.skills[1].aptitude, Some(Aptitude::G));

    let s = report.summary;
    assert_eq!(s.total_stats_score, 8908);
    assert_eq!(s.total_skill_score, 892);
    assert_eq!(s.unique_skill_score, 680);
    assert_eq!(s.overall_score, 10480);
    assert_eq!(s.overall_rating, OverallRating::A);
    assert_eq!(s.points_to_next, NextRating::Points(1620));
}

#[test]
fn test_changing_aptitude_rescores_skills() {
    let (scorer, lib, mut build) = sample();
    let before = evaluate(&scorer, &lib, &build);

    build.aptitudes.set(CheckType::Late, Aptitude::SA);
    let after = evaluate(&scorer, &lib, &build);

    assert_eq!(after.skills[0].score, 508);
    assert_eq!(
        after.summary.overall_score - before.summary.overall_score,
        508 - 332
    );
    assert_eq!(after.summary.total_stats_score, before.summary.total_stats_score);
}

#[test]
fn test_apply_character_from_roster() {
    let roster = CharacterRoster::load_from_file("data/uma_musume.json").unwrap();
    let presets = AptitudePresets::load_from_file("data/aptitudes.json").unwrap();

    let mut build = Build::default();
    build.apply_character(roster.require("gold_ship_summer").unwrap(), &presets);
    assert_eq!(build.character.as_deref(), Some("gold_ship_summer"));
    assert_eq!(build.star_level, 3);
    assert_eq!(build.aptitudes.get(CheckType::Mile), Aptitude::BC);

    // no default star, no presets entry
    let mut build = Build::default();
    build.apply_character(roster.require("Haru Urara").unwrap(), &presets);
    assert_eq!(build.star_level, 1);
    assert_eq!(build.aptitudes.get(CheckType::Dirt), Aptitude::SA);
}

#[test]
fn test_snapshot_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let mut build = Build::default();
    build.stats.set(StatKind::Wit, StatValue::new(777));
    build.aptitudes.set(CheckType::Long, Aptitude::DEF);
    build.skills.push(SkillPick::new(SkillColor::Blue, "Lay Low"));
    build.save_to_file(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"D-E-F\""));
    assert_eq!(Build::load_from_file(&path).unwrap(), build);
}

#[test]
fn test_legacy_letters_in_snapshot() {
    let build: Build = serde_json::from_str(
        r#"{ "aptitudes": { "late": "C", "front": "e" },
             "skills": [ { "color": "yellow", "name": "corner recovery" } ] }"#,
    )
    .unwrap();
    let report = evaluate(&Scorer::default(), &SkillLibrary::fallback(), &build);
    // average column (177) at 0.8
    assert_eq!(report.skills[0].score, 142);
    assert_eq!(report.skills[0].name, "Corner Recovery");
}
