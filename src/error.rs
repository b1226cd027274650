use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("required column '{0}' is missing from the header")]
    MissingColumn(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// Why a single row was dropped. Never fatal, the loader logs it and moves on.
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("empty player name")]
    EmptyIdentifier,

    #[error("{column} is not a number: '{value}'")]
    NotANumber { column: String, value: String },

    #[error("{column} must be a non-negative finite number, got {value}")]
    OutOfRange { column: String, value: f64 },

    #[error("{0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{name} must be a finite number, got {value}")]
    NonFiniteThreshold { name: &'static str, value: f64 },

    #[error("delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(char),
}

// Everything in here is recoverable: a session can keep querying the same graph after one of these.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("player '{0}' not found in the graph")]
    PlayerNotFound(String),

    #[error("player '{0}' appears more than once in the input")]
    DuplicatePlayer(String),
}
