//! Error types for the Syncrop indicator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Failed to read icon {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode icon: {0}")]
    Decode(#[from] image::ImageError),

    #[cfg(not(target_os = "linux"))]
    #[error("Failed to create icon: {0}")]
    Create(#[from] tray_icon::BadIcon),
}

#[derive(Error, Debug)]
pub enum TrayError {
    #[cfg(not(target_os = "linux"))]
    #[error("Menu error: {0}")]
    Menu(#[from] tray_icon::menu::Error),

    #[cfg(not(target_os = "linux"))]
    #[error("Tray icon error: {0}")]
    Build(#[from] tray_icon::Error),

    #[error("Toolkit initialization failed: {0}")]
    Toolkit(String),
}
