//! Command routing through `RunContext`.

use clap::Parser;
use framechain::cli::{map_error, Cli, Commands, RunContext};
use framechain::{ChainError, EngineConfig};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

const BLINK: &str = r#"
name = "blink"
description = "on, off, twice"

[[steps]]
kind = "emit"
event = "on"

[[steps]]
kind = "wait"
seconds = 0.1

[[steps]]
kind = "emit"
event = "off"

[[steps]]
kind = "repeat"
times = 2
"#;

fn scenario_file(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("blink.toml");
    std::fs::write(&path, BLINK).unwrap();
    path
}

#[test]
fn test_run_command_text_output() {
    let temp = TempDir::new().unwrap();
    let context = RunContext::with_config(EngineConfig::default());
    let output = context
        .execute(&Commands::Run {
            scenario: scenario_file(&temp),
            frames: 600,
            dt: 1.0 / 60.0,
            format: "text".to_string(),
        })
        .unwrap();

    assert!(output.contains("Scenario: blink"));
    assert!(output.contains("Finished: frame"));
    assert!(output.contains("Total: 4 event(s)"));
}

#[test]
fn test_run_command_json_output() {
    let temp = TempDir::new().unwrap();
    let context = RunContext::with_config(EngineConfig::default());
    let output = context
        .execute(&Commands::Run {
            scenario: scenario_file(&temp),
            frames: 3,
            dt: 1.0 / 60.0,
            format: "json".to_string(),
        })
        .unwrap();

    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["frames_run"], 3);
    assert!(value["finished_at"].is_null());
    assert_eq!(value["events"][0]["name"], "on");
}

#[test]
fn test_run_command_rejects_unknown_format() {
    let temp = TempDir::new().unwrap();
    let context = RunContext::with_config(EngineConfig::default());
    let err = context
        .execute(&Commands::Run {
            scenario: scenario_file(&temp),
            frames: 10,
            dt: 0.1,
            format: "yaml".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ChainError::Config(_)));
}

#[test]
fn test_check_command_lists_directives() {
    let temp = TempDir::new().unwrap();
    let context = RunContext::with_config(EngineConfig::default());
    let output = context
        .execute(&Commands::Check {
            scenario: scenario_file(&temp),
        })
        .unwrap();

    assert!(output.starts_with("Scenario 'blink' is valid: 4 directive(s), 4 queued step(s)"));
    assert!(output.contains("on, off, twice"));
    assert!(output.contains("4. repeat"));
}

#[test]
fn test_combinators_command() {
    let context = RunContext::with_config(EngineConfig::default());
    let text = context
        .execute(&Commands::Combinators {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(text.contains("say"));
    assert!(text.contains("wait_frames"));

    let json = context
        .execute(&Commands::Combinators {
            format: "json".to_string(),
        })
        .unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total"], 2);
}

#[test]
fn test_missing_scenario_maps_to_readable_error() {
    let temp = TempDir::new().unwrap();
    let context = RunContext::with_config(EngineConfig::default());
    let err = context
        .execute(&Commands::Check {
            scenario: temp.path().join("absent.toml"),
        })
        .unwrap_err();
    assert!(map_error(&err).starts_with("Could not read file:"));
}

#[test]
fn test_context_loads_explicit_config_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("custom.toml");
    std::fs::write(&config_path, "[clock]\ntime_scale = 0.25\n").unwrap();

    let context = RunContext::new(temp.path().to_path_buf(), Some(config_path)).unwrap();
    assert_eq!(context.config().clock.time_scale, 0.25);
}

#[test]
fn test_cli_parses_run_defaults() {
    let cli = Cli::try_parse_from(["framechain", "run", "blink.toml"]).unwrap();
    match cli.command {
        Commands::Run {
            scenario,
            frames,
            format,
            ..
        } => {
            assert_eq!(scenario, PathBuf::from("blink.toml"));
            assert_eq!(frames, 600);
            assert_eq!(format, "text");
        }
        _ => panic!("expected run command"),
    }
    assert_eq!(cli.dir, PathBuf::from("."));
}
