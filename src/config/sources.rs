//! Configuration sources: global file, local file, environment.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::{Environment, File, FileFormat};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "framechain.toml";

/// Prefix for environment overrides, e.g. `FRAMECHAIN__CLOCK__TIME_SCALE=0.5`.
pub const ENV_PREFIX: &str = "FRAMECHAIN";

/// Path to the user-level config file, `$XDG_CONFIG_HOME/framechain/config.toml` on Linux.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "framechain").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add a TOML file source. Optional sources that do not exist are skipped.
pub fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> ConfigBuilder<DefaultState> {
    if !required && !path.exists() {
        debug!(config_path = %path.display(), "optional config file not present");
        return builder;
    }
    builder.add_source(
        File::from(path.to_path_buf())
            .format(FileFormat::Toml)
            .required(required),
    )
}

/// Add the global file, when one exists.
pub fn add_global(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match global_config_path() {
        Some(path) => add_file(builder, &path, false),
        None => builder,
    }
}

/// Add `FRAMECHAIN__SECTION__KEY` environment overrides.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
