//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_check_result, format_combinators_json, format_combinators_text,
    format_run_report_json, format_run_report_text,
};
use crate::config::{ConfigLoader, EngineConfig};
use crate::error::ChainError;
use crate::registry::ChainFactory;
use crate::scenario::{run_scenario, standard_factory, Actor, RunOptions, Scenario};
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: loaded configuration and the chain factory.
pub struct RunContext {
    config: EngineConfig,
    factory: ChainFactory<Actor>,
}

impl RunContext {
    /// Load configuration from `config_path` when given, otherwise from `dir`.
    pub fn new(dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ChainError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&dir)?,
        };
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            factory: standard_factory(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ChainError> {
        match command {
            Commands::Run {
                scenario,
                frames,
                dt,
                format,
            } => self.handle_run(scenario, *frames, *dt, format),
            Commands::Check { scenario } => self.handle_check(scenario),
            Commands::Combinators { format } => self.handle_combinators(format),
        }
    }

    fn handle_run(
        &self,
        path: &Path,
        frames: u64,
        dt: f64,
        format: &str,
    ) -> Result<String, ChainError> {
        let format = parse_format(format)?;
        let scenario = Scenario::load(path)?;
        let options = RunOptions {
            frames,
            frame_delta: dt,
        };
        info!(scenario = %scenario.name, frames, dt, "running scenario");
        let report = run_scenario(&scenario, &self.factory, &self.config.clock, &options)?;
        Ok(match format {
            OutputFormat::Text => format_run_report_text(&report),
            OutputFormat::Json => format_run_report_json(&report)?,
        })
    }

    fn handle_check(&self, path: &Path) -> Result<String, ChainError> {
        let scenario = Scenario::load(path)?;
        let chain = scenario.build(&self.factory, Actor::new())?;
        Ok(format_check_result(&scenario, chain.len()))
    }

    fn handle_combinators(&self, format: &str) -> Result<String, ChainError> {
        let names = self.factory.registry().names();
        Ok(match parse_format(format)? {
            OutputFormat::Text => format_combinators_text(&names),
            OutputFormat::Json => format_combinators_json(&names)?,
        })
    }
}

enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ChainError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ChainError::Config(format!(
            "Invalid output format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}
