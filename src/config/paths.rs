//! Path utilities for the Syncrop indicator.
//!
//! Defines standard locations for the indicator's own configuration and logs,
//! and the home-directory expansion used for the Syncrop log file.

use std::path::{Path, PathBuf};

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "Syncrop", "syncrop")
}

/// Base data directory for the indicator.
///
/// On Linux: `~/.local/share/syncrop`
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".local")
                .join("share")
                .join("syncrop")
        })
}

/// Default configuration file path.
///
/// On Linux: `~/.config/syncrop/indicator.toml`. `--config` (or its
/// environment variable) is resolved by the CLI layer.
pub fn config_file() -> PathBuf {
    project_dirs()
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(data_dir)
        .join("indicator.toml")
}

/// Log directory for the indicator's own logs.
///
/// On Linux: `~/.local/share/syncrop/logs`
pub fn log_dir() -> std::io::Result<PathBuf> {
    let path = data_dir().join("logs");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

/// Expand a leading `~` against `home`.
///
/// Only `~` alone and `~/...` are expanded; `~user/...` is left untouched.
pub fn expand_home_with(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        return home.to_path_buf();
    }

    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Expand a leading `~` against the current user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    expand_home_with(path, dirs::home_dir().as_deref())
}
