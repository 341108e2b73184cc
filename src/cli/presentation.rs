//! CLI presentation: text and json formatters per command.

use crate::error::ChainError;
use crate::scenario::{RunReport, Scenario};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

pub fn format_run_report_text(report: &RunReport) -> String {
    let mut out = format!("Scenario: {}\n", report.scenario);
    match report.finished_at {
        Some(frame) => out.push_str(&format!("Finished: frame {}\n", frame)),
        None => out.push_str(&format!(
            "Finished: no (stopped after {} frames)\n",
            report.frames_run
        )),
    }
    out.push_str(&format!("Simulated time: {:.3}s\n\n", report.simulated_time));

    if report.events.is_empty() {
        out.push_str("No events fired.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Frame", "Time", "Event"]);
    for event in &report.events {
        table.add_row(vec![
            event.frame.to_string(),
            format!("{:.3}", event.time),
            event.name.clone(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out.push_str(&format!("\nTotal: {} event(s)\n", report.events.len()));
    out
}

pub fn format_run_report_json(report: &RunReport) -> Result<String, ChainError> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn format_check_result(scenario: &Scenario, queued_steps: usize) -> String {
    let mut out = format!(
        "Scenario '{}' is valid: {} directive(s), {} queued step(s)\n",
        scenario.name,
        scenario.steps.len(),
        queued_steps
    );
    if let Some(ref description) = scenario.description {
        out.push_str(&format!("  {}\n", description));
    }
    for (index, directive) in scenario.steps.iter().enumerate() {
        out.push_str(&format!("  {:>3}. {}\n", index + 1, directive.kind()));
    }
    out
}

pub fn format_combinators_text(names: &[&str]) -> String {
    if names.is_empty() {
        return "No custom combinators registered.".to_string();
    }
    let mut output = String::from("Custom combinators:\n");
    for name in names {
        output.push_str(&format!("  {}\n", name));
    }
    output.push_str(&format!("\nTotal: {} combinator(s)\n", names.len()));
    output
}

pub fn format_combinators_json(names: &[&str]) -> Result<String, ChainError> {
    let value = json!({
        "combinators": names,
        "total": names.len(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
