//! Error types for the framechain sequencing engine.

use thiserror::Error;

/// Errors raised while building chains, loading configuration, or running scenarios.
///
/// Build-time errors are fatal to the combinator call that raised them; there is
/// no recovery path inside the engine.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("{combinator} requires a preceding step")]
    MissingPrecedingStep { combinator: &'static str },

    #[error("Unknown combinator: {0}")]
    UnknownCombinator(String),

    #[error("Invalid arguments for combinator '{combinator}': {reason}")]
    InvalidArguments { combinator: String, reason: String },

    #[error("Context has no current animation")]
    NoCurrentAnimation,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChainError {
    /// Shorthand for combinators whose arguments fail to deserialize or validate.
    pub fn invalid_arguments(combinator: impl Into<String>, reason: impl ToString) -> Self {
        ChainError::InvalidArguments {
            combinator: combinator.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<config::ConfigError> for ChainError {
    fn from(err: config::ConfigError) -> Self {
        ChainError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for ChainError {
    fn from(err: toml::de::Error) -> Self {
        ChainError::Scenario(err.to_string())
    }
}
