//! CLI parse: clap types for framechain. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// framechain - drive declarative step chains frame by frame
#[derive(Parser)]
#[command(name = "framechain")]
#[command(about = "Build and drive frame-driven step chains from scenario scripts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for framechain.toml
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a scenario and drive it frame by frame
    Run {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Maximum number of frames to drive
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Raw seconds per frame, before clock clamping and scaling
        #[arg(long, default_value = "0.016666666666666666")]
        dt: f64,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Parse and build a scenario without running it
    Check {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },
    /// List the custom combinators available to scenarios
    Combinators {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
