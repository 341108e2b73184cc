//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_check_result, format_combinators_json, format_combinators_text,
    format_run_report_json, format_run_report_text,
};
pub use route::RunContext;
