//! PlcMonitor CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use plcm_app::logging::{LogConfig, LogFormat, init_logging};
use plcm_app::state::Settings;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_convert, run_inspect, run_open, run_recent};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();

    let settings_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_from(&settings_path);

    let log_config = log_config_from_cli(&cli, &settings);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Command::Inspect { file } => run_inspect(settings, settings_path, &file).await,
        Command::Open => run_open(settings, settings_path).await,
        Command::Convert { file, output } => {
            run_convert(settings, settings_path, &file, output).await
        }
        Command::Recent { prune } => run_recent(settings, &settings_path, prune),
    };

    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!("{error:#}");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration with precedence: CLI flags, then a level in
/// the settings file, then `RUST_LOG`, then `warn`.
fn log_config_from_cli(cli: &Cli, settings: &Settings) -> LogConfig {
    let mut config = LogConfig::from_settings(&settings.logging);
    if cli.verbosity.is_present() {
        config.level_filter = cli.verbosity.tracing_level_filter();
        config.use_env_filter = false;
    }
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
        config.use_env_filter = false;
    }
    if let Some(format) = cli.log_format {
        config.format = match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => config.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
