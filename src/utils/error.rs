use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}
