// SPDX-License-Identifier: MIT
//
// Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Debug, Parser)]
#[command(
    name = "petal",
    version,
    about = "Contrast-aware theming: expand palettes, audit and repair text contrast"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q to silence).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand a palette into the full set of theme variables.
    Expand(ExpandArgs),

    /// Report text whose contrast is below a ratio.
    Audit(AuditArgs),

    /// Repair contrast in a tree and report what remains.
    Enforce(EnforceArgs),

    /// List builtin palettes.
    Themes,
}

#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Builtin palette name, or a path to a palette JSON file.
    #[arg(value_name = "THEME")]
    pub theme: String,

    #[arg(long, value_enum, default_value = "css")]
    pub format: ExpandFormat,
}

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Element tree as nested JSON.
    #[arg(value_name = "TREE")]
    pub tree: PathBuf,

    /// Publish this palette into the tree before auditing.
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    #[arg(long = "min-ratio", value_name = "RATIO", default_value_t = 4.5)]
    pub min_ratio: f64,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct EnforceArgs {
    /// Element tree as nested JSON.
    #[arg(value_name = "TREE")]
    pub tree: PathBuf,

    /// Activate this palette, then enforce.
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Enforcer settings as JSON.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the configured base ratio.
    #[arg(long = "min-ratio", value_name = "RATIO")]
    pub min_ratio: Option<f64>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExpandFormat {
    /// A `:root { ... }` block.
    Css,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
