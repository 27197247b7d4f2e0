//! Config command - configuration utilities.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::ConfigAction;
use crate::config::Config;

/// Run the config command.
pub fn run(action: ConfigAction, config_path: &Path, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(config),
        ConfigAction::Path => show_path(config_path),
    }
}

fn show_config(config: &Config) -> Result<()> {
    if config.path.exists() {
        println!("# Loaded from {}", config.path.display());
    } else {
        println!("# No config file at {}, showing defaults", config.path.display());
    }

    let rendered = config.to_toml().context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

fn show_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}
