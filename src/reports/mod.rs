use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use umacalc::build::BuildReport;
use umacalc::library::tsv::{ImportMode, ImportOutcome};
use umacalc::library::validate::ValidationReport;
use umacalc::library::{SkillColor, SkillEntry};
use umacalc::scorer::skills::SkillScore;
use umacalc::scorer::stats::StatValue;
use umacalc::scorer::NextRating;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn score_cell(score: i64) -> Cell {
    let cell = Cell::new(score);
    if score < 0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

pub fn print_build_report(report: &BuildReport) {
    let mut stats = new_table();
    stats.add_row(vec![
        Cell::new("Stat").add_attribute(Attribute::Bold),
        Cell::new("Value"),
        Cell::new("Rank").fg(Color::Cyan),
        Cell::new("Score"),
    ]);
    align_right(&mut stats, 1..=3);
    for row in &report.stats {
        stats.add_row(vec![
            Cell::new(row.kind).add_attribute(Attribute::Bold),
            Cell::new(row.value),
            Cell::new(row.rank).fg(Color::Cyan),
            Cell::new(row.score),
        ]);
    }
    println!("\n{}", stats);

    if !report.skills.is_empty() {
        let mut skills = new_table();
        skills.add_row(vec![
            Cell::new("Skill").add_attribute(Attribute::Bold),
            Cell::new("Color"),
            Cell::new("Check"),
            Cell::new("Aptitude"),
            Cell::new("Score"),
        ]);
        align_right(&mut skills, 4..=4);
        for row in &report.skills {
            let name = if row.matched {
                Cell::new(&row.name).add_attribute(Attribute::Bold)
            } else {
                Cell::new(format!("{} (unknown)", row.name)).fg(Color::Yellow)
            };
            skills.add_row(vec![
                name,
                Cell::new(row.color),
                Cell::new(row.check_type.map(|c| c.to_string()).unwrap_or_default()),
                Cell::new(row.aptitude.map(|a| a.to_string()).unwrap_or_default()),
                score_cell(row.score),
            ]);
        }
        println!("\n{}", skills);
    }

    if let Some(name) = &report.unique_skill {
        println!("\n⭐ Unique skill: {}", name);
    }

    let s = &report.summary;
    let mut summary = new_table();
    summary.add_row(vec![
        Cell::new("Stats"),
        Cell::new("Skills"),
        Cell::new("Unique"),
        Cell::new("Overall").add_attribute(Attribute::Bold),
        Cell::new("Rating").fg(Color::Cyan),
        Cell::new("To Next"),
    ]);
    align_right(&mut summary, 0..=5);
    let next = match s.points_to_next {
        NextRating::Max => Cell::new(s.points_to_next).fg(Color::Green),
        NextRating::Points(_) => Cell::new(s.points_to_next),
    };
    summary.add_row(vec![
        Cell::new(s.total_stats_score),
        score_cell(s.total_skill_score),
        Cell::new(s.unique_skill_score),
        Cell::new(s.overall_score).add_attribute(Attribute::Bold),
        Cell::new(s.overall_rating)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        next,
    ]);
    println!("\n{}", summary);
}

pub fn print_stat_values(rows: &[(StatValue, String, i64)]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Value").add_attribute(Attribute::Bold),
        Cell::new("Rank").fg(Color::Cyan),
        Cell::new("Score"),
    ]);
    align_right(&mut table, 0..=2);
    for (value, rank, score) in rows {
        table.add_row(vec![
            Cell::new(value),
            Cell::new(rank).fg(Color::Cyan),
            Cell::new(score),
        ]);
    }
    if rows.len() > 1 {
        let total: i64 = rows.iter().map(|r| r.2).sum();
        table.add_row(vec![
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(total).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{}", table);
}

pub fn print_skill_list(color: SkillColor, skills: &[&SkillEntry]) {
    println!("\n{} ({})", color.to_string().to_uppercase(), skills.len());
    if skills.is_empty() {
        return;
    }
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Skill").add_attribute(Attribute::Bold),
        Cell::new("Check"),
        Cell::new("Base"),
        Cell::new("Good").fg(Color::Green),
        Cell::new("Avg"),
        Cell::new("Bad"),
        Cell::new("Terr").fg(Color::Red),
    ]);
    align_right(&mut table, 2..=6);

    let opt = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
    for skill in skills {
        let mut row = vec![
            Cell::new(&skill.name).add_attribute(Attribute::Bold),
            Cell::new(skill.check_type.as_deref().unwrap_or("")),
        ];
        match &skill.score {
            SkillScore::Flat(v) => {
                row.push(score_cell(*v));
                row.extend((0..4).map(|_| Cell::new("-")));
            }
            SkillScore::Table(t) => {
                row.extend(
                    [t.base, t.good, t.average, t.bad, t.terrible]
                        .into_iter()
                        .map(|v| Cell::new(opt(v))),
                );
            }
        }
        table.add_row(row);
    }
    println!("{}", table);
}

pub fn print_validation_report(report: &ValidationReport) {
    if !report.errors.is_empty() {
        let mut table = new_table();
        table.add_row(vec![Cell::new(format!("ERRORS ({})", report.errors.len()))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)]);
        for e in &report.errors {
            table.add_row(vec![Cell::new(e)]);
        }
        println!("\n{}", table);
    }

    if !report.warnings.is_empty() {
        let mut table = new_table();
        table.add_row(vec![Cell::new(format!("WARNINGS ({})", report.warnings.len()))
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold)]);
        for w in &report.warnings {
            table.add_row(vec![Cell::new(w)]);
        }
        println!("\n{}", table);
    }

    if report.is_clean() {
        println!("✅ All {} skills passed validation", report.skills_checked);
    } else if report.is_ok() {
        println!(
            "⚠️  {} skills checked, {} warning(s)",
            report.skills_checked,
            report.warnings.len()
        );
    } else {
        println!("❌ {} skills checked, validation failed", report.skills_checked);
    }
}

pub fn print_layout_counts(action: &str, counts: &[(SkillColor, usize)], total: usize) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(action).add_attribute(Attribute::Bold),
        Cell::new("Skills"),
    ]);
    align_right(&mut table, 1..=1);
    for (color, n) in counts {
        table.add_row(vec![Cell::new(color), Cell::new(n)]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    println!("{}", table);
}

pub fn print_import_summary(color: SkillColor, mode: ImportMode, outcome: &ImportOutcome) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(format!("{} ({})", color, mode)).add_attribute(Attribute::Bold),
        Cell::new("Updated"),
        Cell::new("Added").fg(Color::Green),
        Cell::new("Kept"),
        Cell::new("Total"),
    ]);
    align_right(&mut table, 1..=4);
    table.add_row(vec![
        Cell::new(""),
        Cell::new(outcome.updated),
        Cell::new(outcome.added).fg(Color::Green),
        Cell::new(outcome.kept),
        Cell::new(outcome.skills.len()),
    ]);
    println!("{}", table);
}
