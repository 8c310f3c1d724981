//! CLI argument definitions for the asset register tools.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use iar_lookup::DEFAULT_LOOKUP_URL;

#[derive(Parser)]
#[command(
    name = "iar",
    version,
    about = "Information asset register migration and upload",
    long_about = "Migrate legacy information asset register spreadsheets into asset \
                  documents and upload them to the asset registry.\n\n\
                  Both commands read and write multi-document YAML streams; `-` \
                  stands for standard input or output."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a legacy spreadsheet export into asset documents.
    Migrate(MigrateArgs),

    /// Create or update assets in the registry.
    Upload(UploadArgs),
}

#[derive(Parser)]
pub struct MigrateArgs {
    /// Legacy register exported as CSV (`-` for standard input).
    #[arg(value_name = "CSV", default_value = "-")]
    pub csv: PathBuf,

    /// Where to write the document stream (`-` for standard output).
    #[arg(long = "output", short = 'o', value_name = "FILE", default_value = "-")]
    pub output: PathBuf,

    /// Banner rows at the top of the export.
    #[arg(long = "skip-rows", value_name = "NUM", default_value_t = 6)]
    pub skip_rows: usize,

    /// Leading columns before the department column.
    #[arg(long = "skip-cols", value_name = "NUM", default_value_t = 1)]
    pub skip_cols: usize,

    /// YAML file of manual department mappings. May be repeated; later
    /// files replace earlier ones.
    #[arg(long = "fixups", value_name = "FILE")]
    pub fixups: Vec<PathBuf>,

    /// Resolve departments against a local YAML institution list instead of
    /// the directory service.
    #[arg(long = "directory", value_name = "FILE", conflicts_with = "lookup_url")]
    pub directory: Option<PathBuf>,

    /// Base URL of the institution directory API.
    #[arg(long = "lookup-url", value_name = "URL", default_value = DEFAULT_LOOKUP_URL)]
    pub lookup_url: String,

    /// Allow spreadsheet cell values in trace logs.
    #[arg(long = "log-data")]
    pub log_data: bool,

    /// Exit with status 1 when any department is unresolved.
    #[arg(long = "fail-on-errors")]
    pub fail_on_errors: bool,
}

#[derive(Parser)]
pub struct UploadArgs {
    /// Registry collection URL; must end with `/`.
    #[arg(value_name = "ENDPOINT")]
    pub endpoint: String,

    /// Document streams containing assets (`-` for standard input).
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,

    /// Bearer token for the registry.
    #[arg(long = "token", env = "IAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Where to write upload reports (`-` for standard output).
    #[arg(long = "output", short = 'o', value_name = "FILE", default_value = "-")]
    pub output: PathBuf,

    /// Upload reports of an earlier run; previously created assets are
    /// updated instead of created again. May be repeated.
    #[arg(long = "previous-report", value_name = "FILE")]
    pub previous_report: Vec<PathBuf>,

    /// Exit with status 1 when any asset fails to upload.
    #[arg(long = "fail-on-errors")]
    pub fail_on_errors: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
