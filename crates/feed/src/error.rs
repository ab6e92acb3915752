//! Error types for the feed crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to read {path}: {error}")]
    Io { path: String, error: String },

    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;
