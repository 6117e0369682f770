#![forbid(unsafe_code)]

mod bridge;
mod cli;
mod config;
mod constants;
mod dashboard;
mod persistence;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level as TraceLevel, debug};
use tracing_subscriber::FmtSubscriber;

use bridge::Bridge;
use cli::Cli;
use config::{DataPaths, IntervalBackingKind};
use constants::env;

fn main() -> anyhow::Result<ExitCode> {
    // Parse log level from environment variable
    let log_level = match std::env::var(env::LOG_LEVEL)
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let paths = DataPaths::resolve(
        cli.data_dir,
        std::env::var_os(env::DATA_DIR).map(PathBuf::from),
    );
    let backing = IntervalBackingKind::resolve(
        cli.interval_backing,
        std::env::var(env::INTERVAL_BACKING).ok().as_deref(),
    );
    debug!(data_dir = %paths.data_dir().display(), ?backing, "Resolved configuration");

    let mut bridge = Bridge::open(&paths, backing, std::env::var(env::REFRESH_INTERVAL_MS).ok());

    if let Err(err) = cli::execute(cli.command, &mut bridge) {
        cli::report_failure(&err);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
