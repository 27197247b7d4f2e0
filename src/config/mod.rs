//! Configuration management for the Syncrop indicator.
//!
//! Every field has a default matching the packaged Syncrop install, so the
//! indicator runs without any config file present.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub mod paths;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the config file (set after loading)
    #[serde(skip)]
    pub path: PathBuf,

    /// Icon image shown in the notification area
    #[serde(default = "default_icon_path")]
    pub icon_path: PathBuf,

    /// Syncrop daemon log opened by "Open log file"
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Program used to open the log file
    #[serde(default = "default_opener")]
    pub opener: String,

    /// Companion GUI launched on primary click, resolved through PATH
    #[serde(default = "default_companion")]
    pub companion: String,

    /// Expand a leading `~` in `log_file` before handing it to the opener
    #[serde(default)]
    pub expand_home: bool,

    /// Tooltip shown when hovering the icon
    #[serde(default = "default_tooltip")]
    pub tooltip: String,
}

fn default_icon_path() -> PathBuf {
    PathBuf::from("/usr/share/pixmaps/syncrop.png")
}

fn default_log_file() -> String {
    "~/.syncrop/syncrop.log".to_string()
}

fn default_opener() -> String {
    "xdg-open".to_string()
}

fn default_companion() -> String {
    "syncrop-gui".to_string()
}

fn default_tooltip() -> String {
    "Syncrop".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            icon_path: default_icon_path(),
            log_file: default_log_file(),
            opener: default_opener(),
            companion: default_companion(),
            expand_home: false,
            tooltip: default_tooltip(),
        }
    }
}

/// Values supplied on the command line, layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub icon_path: Option<PathBuf>,
    pub log_file: Option<String>,
    pub opener: Option<String>,
    pub companion: Option<String>,
    pub expand_home: bool,
}

impl Config {
    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let mut config = Self::parse(&content)?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self {
                path: path.to_path_buf(),
                ..Self::default()
            });
        }

        Self::load_from(path)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(icon_path) = overrides.icon_path {
            self.icon_path = icon_path;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = log_file;
        }
        if let Some(opener) = overrides.opener {
            self.opener = opener;
        }
        if let Some(companion) = overrides.companion {
            self.companion = companion;
        }
        // The flag can only enable expansion
        self.expand_home |= overrides.expand_home;

        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_file.trim().is_empty() {
            return Err(ConfigError::MissingField("log_file"));
        }
        if self.opener.trim().is_empty() {
            return Err(ConfigError::MissingField("opener"));
        }
        if self.companion.trim().is_empty() {
            return Err(ConfigError::MissingField("companion"));
        }
        Ok(())
    }

    /// The argument handed to the opener for "Open log file".
    ///
    /// Passed through verbatim unless `expand_home` is set, in which case a
    /// leading `~` resolves to the user's home directory.
    pub fn log_target(&self) -> OsString {
        if self.expand_home {
            paths::expand_home(&self.log_file).into_os_string()
        } else {
            OsString::from(&self.log_file)
        }
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
