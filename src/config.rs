//! Configuration System
//!
//! Layered configuration for the frame clock and logging. Precedence, lowest first:
//! built-in defaults, the global file, a local `framechain.toml` (or an explicit
//! file), then `FRAMECHAIN__*` environment variables.

use crate::clock::ClockConfig;
use crate::error::ChainError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge_policy;
mod sources;

pub use sources::{global_config_path, ENV_PREFIX, LOCAL_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Frame clock settings
    #[serde(default)]
    pub clock: ClockConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Clock(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Clock(msg) => write!(f, "Clock: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EngineConfig {
    /// Validate the entire configuration, collecting every error.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.clock.validate() {
            errors.push(ValidationError::Clock(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every error into one [`ChainError::Config`].
    pub fn validated(self) -> Result<Self, ChainError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ChainError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}

/// Loads [`EngineConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file, `<dir>/framechain.toml`, then the environment.
    pub fn load(dir: &Path) -> Result<EngineConfig, ChainError> {
        let local = dir.join(LOCAL_CONFIG_FILE);
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = sources::add_global(builder);
        builder = sources::add_file(builder, &local, false);
        builder = sources::add_environment(builder);

        let config: EngineConfig = builder.build()?.try_deserialize()?;
        debug!(dir = %dir.display(), "loaded configuration");
        config.validated()
    }

    /// Load defaults, then `path` (which must exist), then the environment.
    pub fn load_from_file(path: &Path) -> Result<EngineConfig, ChainError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = sources::add_file(builder, path, true);
        builder = sources::add_environment(builder);

        let config: EngineConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "loaded configuration file");
        config.validated()
    }

    /// User-level config file location, if the platform has one.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_config_path()
    }
}
