use thiserror::Error;

/// Application-level error type.
///
/// Only configuration and input failures surface here. Provider failures are
/// absorbed by the LLM client and malformed model output degrades to an empty
/// batch result, so neither has a variant.
#[derive(Debug, Error)]
pub enum RankerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid batch size: {0} (must be at least 1)")]
    InvalidBatchSize(usize),
}
