//! CLI command definitions and handlers.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{paths, Config, Overrides};
use crate::error::ConfigError;

pub mod config;
pub mod doctor;

/// Syncrop tray indicator - quick access to the Syncrop log and GUI.
#[derive(Parser, Debug)]
#[command(name = "syncrop-indicator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level
    #[arg(
        long,
        default_value = "info",
        env = "SYNCROP_INDICATOR_LOG_LEVEL",
        global = true
    )]
    pub log_level: LogLevel,

    /// Path to config file
    #[arg(long, env = "SYNCROP_INDICATOR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Per-run replacements for config file values.
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Tray icon image
    #[arg(long, global = true)]
    pub icon: Option<PathBuf>,

    /// Log file opened by "Open log file"
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    /// Program used to open the log file
    #[arg(long, global = true)]
    pub opener: Option<String>,

    /// Program launched when the icon is clicked
    #[arg(long, global = true)]
    pub companion: Option<String>,

    /// Expand a leading `~` in the log file path. Can only turn expansion
    /// on; `expand_home = true` in the config file is not undone by omitting it
    #[arg(long, global = true)]
    pub expand_home: bool,
}

impl From<OverrideArgs> for Overrides {
    fn from(args: OverrideArgs) -> Self {
        Overrides {
            icon_path: args.icon,
            log_file: args.log_file,
            opener: args.opener,
            companion: args.companion,
            expand_home: args.expand_home,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the tray indicator (default)
    Tray,

    /// Check the icon, helper programs and log path
    Doctor,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Show configuration file path
    Path,
}

impl Cli {
    /// Config file location, honoring `--config`.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(paths::config_file)
    }

    /// Load the config file and layer the command-line overrides on top.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        Config::load_or_default(&self.config_path())?.with_overrides(self.overrides.clone().into())
    }

    pub fn runs_tray(&self) -> bool {
        matches!(self.command, None | Some(Command::Tray))
    }
}
