// SPDX-License-Identifier: MIT
//
// petal — contrast-aware theming from the command line.
//
// Wires the library crates together:
//
//   petal-color    → color algebra, CSS color and gradient parsing
//   petal-theme    → palettes, variable expansion, style sinks
//   petal-contrast → enforcement and diagnostics over a visual tree
//
// Trees are read from nested JSON (see `petal_contrast::ElementSpec`), so
// pages captured from a browser can be audited offline.

mod cli;
mod commands;
mod logging;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::logging::{LogConfig, LogFormat, init_logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    let result = match &cli.command {
        Command::Expand(args) => commands::run_expand(args),
        Command::Audit(args) => commands::run_audit(args),
        Command::Enforce(args) => commands::run_enforce(args),
        Command::Themes => Ok(commands::run_themes()),
    };

    match result {
        Ok(output) => {
            print!("{}", output.text);
            if output.failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        ..LogConfig::default()
    }
}
