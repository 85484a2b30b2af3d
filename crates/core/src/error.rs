use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalahError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid position: line {line} is outside a document of {line_count} lines")]
    InvalidPosition { line: usize, line_count: usize },
}

pub type Result<T> = std::result::Result<T, GalahError>;
