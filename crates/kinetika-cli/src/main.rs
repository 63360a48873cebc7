//! Kinetika CLI
//!
//! Command-line interface for inspecting feature gating.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use kinetika_cli::cli::{Cli, Command};
use kinetika_cli::commands::{cmd_check, cmd_explain, cmd_features};
use kinetika_cli::config::KinetikaConfig;
use kinetika_cli::config_handlers::handle_config_command;
use kinetika_cli::logging::Logging;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let logging = Logging::init(cli.verbose);

    match cli.command {
        // Config commands must work even when the file is broken
        Command::Config { action } => {
            handle_config_command(config_path, action)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(args) => {
            let config = load_config(config_path, &logging)?;
            let report = cmd_check(&config, &args)?;
            println!("{}", report.render());
            if report.decision.is_allowed() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Explain { permission } => {
            let config = load_config(config_path, &logging)?;
            for line in cmd_explain(&config.restriction_map()?, &permission) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Features => {
            let config = load_config(config_path, &logging)?;
            print!("{}", cmd_features(&config)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the config, then switch logging to its configured level.
fn load_config(config_path: Option<&str>, logging: &Logging) -> Result<KinetikaConfig> {
    let config = KinetikaConfig::load(config_path)?;
    logging.apply_config_level(&config.logging.level);
    Ok(config)
}
