//! Error types for Hunter Coin consensus parameters.
//!
//! Only the configuration boundary can fail. The activation queries and the
//! parameter accessors are total and never return errors.

use thiserror::Error;

/// Errors raised while turning operator input into consensus types.
#[derive(Error, Debug)]
pub enum ParamsError {
    /// Network name not recognised
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Fork name not recognised
    #[error("Unknown fork: {0}")]
    UnknownFork(String),

    /// Fork ordinal outside the known set
    #[error("Invalid fork ordinal: {0}")]
    InvalidForkOrdinal(u8),

    /// Algorithm name not recognised
    #[error("Unknown proof-of-work algorithm: {0}")]
    UnknownAlgo(String),

    /// Algorithm ordinal outside the known set
    #[error("Invalid proof-of-work algorithm ordinal: {0}")]
    InvalidAlgoOrdinal(u8),

    /// Malformed configuration document
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Input/output error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for consensus parameter operations.
pub type Result<T> = std::result::Result<T, ParamsError>;
