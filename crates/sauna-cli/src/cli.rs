//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sauna_model::DataType;

#[derive(Parser)]
#[command(
    name = "sauna-dashboard",
    version,
    about = "Sauna rental analytics - ingest booking CSVs into dashboard state",
    long_about = "Ingest heterogeneous CSV exports (member rosters, occupancy \n\
                  frames, reservation logs, sales ledgers, finance reports, \n\
                  competitor surveys) into a shared dashboard state.\n\n\
                  Handles Japanese encodings (Shift-JIS, EUC-JP, ISO-2022-JP) \n\
                  and bilingual column headers automatically."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Process one CSV upload into the dashboard state.
    Ingest(IngestArgs),

    /// Discover and process every CSV in a data directory.
    Batch(BatchArgs),

    /// Print the dashboard state as JSON.
    Show(StateArgs),

    /// Reset the dashboard state, preserving competitor data.
    Reset(StateArgs),

    /// List the supported upload data types.
    DataTypes,
}

#[derive(Parser)]
pub struct IngestArgs {
    /// Path to the CSV file to ingest.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Declared data type; `auto` sniffs it from the filename.
    #[arg(long = "data-type", default_value = "auto", value_name = "TYPE")]
    pub data_type: DataType,

    /// Also save the raw upload into this directory.
    #[arg(long = "uploads-dir", value_name = "DIR")]
    pub uploads_dir: Option<PathBuf>,

    /// Dashboard state file to read and update.
    #[arg(long = "state", value_name = "PATH", default_value = "dashboard_state.json")]
    pub state: PathBuf,

    /// Analytics configuration file (JSON).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Directory of CSV exports, classified by filename.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Also save accepted uploads into this directory.
    #[arg(long = "uploads-dir", value_name = "DIR")]
    pub uploads_dir: Option<PathBuf>,

    /// Dashboard state file to read and update.
    #[arg(long = "state", value_name = "PATH", default_value = "dashboard_state.json")]
    pub state: PathBuf,

    /// Analytics configuration file (JSON).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser)]
pub struct StateArgs {
    /// Dashboard state file.
    #[arg(long = "state", value_name = "PATH", default_value = "dashboard_state.json")]
    pub state: PathBuf,
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
