//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ChainError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ChainError) -> String {
    match e {
        ChainError::Io(io) => format!("Could not read file: {}", io),
        other => other.to_string(),
    }
}
