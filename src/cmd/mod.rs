pub mod evaluate;
pub mod layout;
pub mod skills;
pub mod stat;
pub mod tsv;
pub mod validate;

/// Data file locations shared by every subcommand.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub skills: String,
    pub aptitudes: String,
    pub roster: String,
}
