//! Error types for session control and statistics persistence

use crate::entities::Phase;

/// Error type for game operations
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Configuration rejected by `GameConfig::validate`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Phase change requested from a phase that does not allow it
    #[error("Cannot {action} while in {from} phase")]
    IllegalTransition { from: Phase, action: &'static str },

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Statistics record could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for game operations
pub type Result<T> = std::result::Result<T, GameError>;
