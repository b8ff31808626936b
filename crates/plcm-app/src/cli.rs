//! CLI argument definitions for `plc-monitor`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "plc-monitor",
    version,
    about = "PlcMonitor - inspect and convert PLC monitoring projects",
    long_about = "Work with PlcMonitor project files (.plcson) from the command line.\n\n\
                  Projects list the PLCs to monitor and their variable trees."
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

    /// Explicit log level (overrides -v/-q flags and the settings file).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (overrides the settings file).
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file to use instead of the one in the config directory.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open a project file and summarize its PLCs.
    Inspect {
        /// Project file (.plcson).
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Pick a project file in a native dialog and summarize it.
    Open,

    /// Open a project file and save it under a new name.
    Convert {
        /// Project file to read.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Destination; `.plcson` is appended when it has no extension.
        #[arg(long = "output", short = 'o', value_name = "OUT")]
        output: PathBuf,
    },

    /// List recently used project files.
    Recent {
        /// Drop entries whose file no longer exists.
        #[arg(long = "prune")]
        prune: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
