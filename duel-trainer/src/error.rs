use std::path::PathBuf;

use duel_core::MoveError;

/// Errors that can occur while playing a game.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("no move available in a position that is still playing")]
    NoMoves,

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("input closed before a move was entered")]
    InputClosed,

    #[error("unusable weights for {key}: {reason}")]
    Weights { key: String, reason: String },

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when saving or loading weights.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("failed to read weights from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported weights version: {0}")]
    UnsupportedVersion(u32),

    #[error("weights checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid weight {value} for {key}")]
    InvalidWeight { key: String, value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
