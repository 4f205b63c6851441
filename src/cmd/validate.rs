use super::DataPaths;
use crate::reports;
use umacalc::error::{UcResult, UmaCalcError};
use umacalc::library::validate::validate_library;

pub fn run(paths: &DataPaths) -> UcResult<()> {
    println!("🔎 Validating skill library: {}", paths.skills);
    let report = validate_library(&paths.skills);
    reports::print_validation_report(&report);
    if report.is_ok() {
        Ok(())
    } else {
        Err(UmaCalcError::Validation(format!(
            "{} error(s) in skill library",
            report.errors.len()
        )))
    }
}
