use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use umacalc::build::{self, Build, SkillPick, StatKind};
use umacalc::library::SkillLibrary;
use umacalc::scorer::aptitude::{Aptitude, CheckType};
use umacalc::scorer::stats::StatValue;
use umacalc::scorer::Scorer;

fn setup_build(lib: &SkillLibrary) -> Build {
    let mut build = Build::default();
    let stats = build.stats;
    for (i, (kind, _)) in stats.iter().enumerate() {
        build.stats.set(kind, StatValue::new(600 + 250 * i as u32));
    }
    // every built-in skill, twice
    for _ in 0..2 {
        for color in lib.colors() {
            for skill in lib.skills(color) {
                build.skills.push(SkillPick::new(color, &skill.name));
            }
        }
    }
    build.aptitudes.set(CheckType::Late, Aptitude::BC);
    build.aptitudes.set(CheckType::Front, Aptitude::G);
    build.stats.set(StatKind::Wit, StatValue::new(1450));
    build
}

fn criterion_benchmark(c: &mut Criterion) {
    let scorer = Scorer::default();
    let lib = SkillLibrary::fallback();
    let build = setup_build(&lib);

    c.bench_function("stat_score (0..2500)", |b| {
        b.iter(|| {
            (0..2500u32)
                .map(|v| scorer.stat_score(black_box(StatValue::new(v))))
                .sum::<i64>()
        })
    });

    c.bench_function("evaluate (42 skills)", |b| {
        b.iter(|| build::evaluate(black_box(&scorer), black_box(&lib), black_box(&build)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
