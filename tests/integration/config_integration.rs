//! Integration tests for the configuration system

use framechain::config::{ConfigLoader, EngineConfig, LOCAL_CONFIG_FILE};
use framechain::logging::LoggingConfig;
use framechain::scenario::{run_scenario, standard_factory, RunOptions, Scenario};
use framechain::{ChainError, FrameClock};
use tempfile::TempDir;

#[test]
fn test_local_file_drives_clock() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(LOCAL_CONFIG_FILE),
        r#"
[clock]
time_scale = 2.0
max_step = 0.1

[logging]
level = "info"

[logging.modules]
"framechain::chain" = "trace"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(
        config.logging.modules.get("framechain::chain").map(String::as_str),
        Some("trace")
    );

    let mut clock = FrameClock::new(config.clock.clone());
    assert_eq!(clock.tick(0.05), 0.1);
    assert_eq!(clock.tick(1.0), 0.2);
    assert_eq!(clock.frames(), 2);
}

#[test]
fn test_time_scale_changes_scenario_timing() {
    let scenario = Scenario::from_toml_str(
        "name = \"slow\"\n[[steps]]\nkind = \"wait\"\nseconds = 1.0\n[[steps]]\nkind = \"emit\"\nevent = \"go\"\n",
    )
    .unwrap();
    let options = RunOptions {
        frames: 100,
        frame_delta: 0.25,
    };

    let mut config = EngineConfig::default();
    config.clock.max_step = 1.0;
    let normal = run_scenario(&scenario, &standard_factory(), &config.clock, &options).unwrap();

    config.clock.time_scale = 0.5;
    let slow = run_scenario(&scenario, &standard_factory(), &config.clock, &options).unwrap();

    assert_eq!(normal.finished_at, Some(5));
    assert_eq!(slow.finished_at, Some(9));
}

#[test]
fn test_invalid_logging_values_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    std::fs::write(&config_file, "[logging]\noutput = \"syslog\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&config_file).unwrap_err();
    assert!(matches!(err, ChainError::Config(ref msg) if msg.contains("syslog")));
}

#[test]
fn test_absent_local_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::load(temp_dir.path());
    // A user-level global file may exist on the host; only check it loads and validates.
    let config = config.unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(LoggingConfig::default().level, "warn");
}
