// File: src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TajweedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("Snapshot is older than its datasets: {0}")]
    StaleSnapshot(String),

    #[error("Invalid verse key: {0}")]
    InvalidVerseKey(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TajweedError>;
