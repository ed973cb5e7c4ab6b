use thiserror::Error;

/// Failures at the edges of the engine: reading catalogs and configs, and
/// resolving user-supplied share codes. Scoring and search never fail.
#[derive(Error, Debug)]
pub enum DeckForgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown card id '{0}'")]
    UnknownCard(String),

    #[error("Invalid share code: {0}")]
    ShareCode(String),
}

pub type DfResult<T> = Result<T, DeckForgeError>;
