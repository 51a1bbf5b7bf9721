//! Error types for Skyfeed
//!
//! Nothing in the composition path is fatal. `FeedError::MalformedIdentifier`
//! is recovered inside the composer; the remaining variants surface from the
//! page decoder, the table surface, and configuration loading.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SkyfeedError>;

#[derive(Error, Debug)]
pub enum SkyfeedError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SkyfeedError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SkyfeedError::InvalidInput(_) => 3,
            SkyfeedError::Feed(FeedError::RowOutOfRange { .. }) => 3,
            SkyfeedError::Feed(_) => 1,
            SkyfeedError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Malformed identifier (missing at:// prefix): {0}")]
    MalformedIdentifier(String),

    #[error("Failed to decode feed page: {0}")]
    Decode(String),

    #[error("Row {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}
