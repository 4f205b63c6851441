use thiserror::Error;

#[derive(Error, Debug)]
pub enum UmaCalcError {
    #[error("Cannot read or write data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed skill sheet (TSV): {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scoring tables: {0}")]
    Config(String),

    #[error("Skill library error: {0}")]
    Validation(String),

    #[error("Unknown character '{0}'")]
    UnknownCharacter(String),
}

pub type UcResult<T> = Result<T, UmaCalcError>;
