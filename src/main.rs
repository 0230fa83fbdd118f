use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod domain;
mod error;
mod exit_codes;
mod logging;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use exit_codes::*;
pub use services::config::{load_config, LintConfig};
pub use services::loader::collect_documents;
pub use services::output::{print_one, print_out, render_range, render_scan};
pub use services::range::RangeSettingValidator;
pub use services::scanner::{build_report, Scanner};
pub use services::schema::SchemaRules;
pub use services::vocabulary::Vocabulary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let config = load_config(cli.config.as_deref())?;

    if let Some(code) = handle_check_commands(cli, &config)? {
        return Ok(code);
    }
    if let Some(code) = handle_catalog_commands(cli, &config)? {
        return Ok(code);
    }
    Ok(EXIT_SUCCESS)
}
