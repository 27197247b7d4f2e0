//! Syncrop tray indicator
//!
//! Sits in the desktop notification area next to the Syncrop daemon. The
//! context menu opens the daemon log or quits; clicking the icon starts the
//! Syncrop GUI.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod crash;
mod dispatch;
mod error;
mod launcher;
mod tray;

use cli::{Cli, Command};

fn main() {
    if let Err(e) = real_main() {
        eprintln!("Syncrop indicator error: {:?}", e);
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    // Install crash handler first thing
    crash::install_panic_hook();

    let cli = Cli::parse();

    // The tray logs to a file since it normally has no terminal
    let _guard = if cli.runs_tray() {
        init_file_logging(&cli)?
    } else {
        init_console_logging(&cli)?
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Syncrop indicator starting"
    );

    let config_path = cli.config_path();
    let config = cli
        .load_config()
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    match cli.command {
        None | Some(Command::Tray) => {
            tray::run_tray(config).context("Tray indicator failed")?;
            info!("Syncrop indicator exiting");
            Ok(())
        }
        Some(Command::Doctor) => cli::doctor::run(&config),
        Some(Command::Config { action }) => cli::config::run(action, &config_path, &config),
    }
}

fn init_console_logging(cli: &Cli) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    Ok(None)
}

fn init_file_logging(cli: &Cli) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = config::paths::log_dir().context("Failed to create log directory")?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("syncrop-indicator")
        .filename_suffix("log")
        .max_log_files(7)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .json()
                .with_writer(non_blocking),
        )
        .init();

    Ok(Some(guard))
}
