//! Error types for the recoverable edges of the engine.
//!
//! The search itself has no error path: timeouts and empty orderings are
//! absorbed into a move, and a rules authority rejecting its own move is a
//! bug that panics. What remains is input from outside: position setup,
//! move strings and configuration files.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while setting up or updating a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The `chess` crate rejected the FEN string
    #[error("invalid FEN '{fen}'")]
    InvalidFen { fen: String },
    /// Move string is not long algebraic notation
    #[error("malformed move '{notation}', expected e.g. e2e4 or e7e8q")]
    MalformedMove { notation: String },
    /// Move string parsed but is not legal in the current position
    #[error("illegal move '{notation}'")]
    IllegalMove { notation: String },
}

/// Failures while loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("difficulty '{tier}' has depth {depth}, expected 1..={max}")]
    InvalidDepth { tier: String, depth: i32, max: i32 },
    #[error("move time must be positive")]
    ZeroMoveTime,
    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),
}
