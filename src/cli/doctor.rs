//! Doctor command - checks that the tray actions can work.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::tray::icon;

/// ANSI color codes for terminal output.
mod color {
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug)]
struct CheckResult {
    status: CheckStatus,
    label: String,
    detail: Option<String>,
}

impl CheckResult {
    fn ok(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Ok,
            label: label.into(),
            detail: Some(detail.into()),
        }
    }

    fn warning(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warning,
            label: label.into(),
            detail: Some(detail.into()),
        }
    }

    fn error(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            label: label.into(),
            detail: Some(detail.into()),
        }
    }

    fn print(&self) {
        let (icon, color) = match self.status {
            CheckStatus::Ok => ("[OK]", color::GREEN),
            CheckStatus::Warning => ("[!!]", color::YELLOW),
            CheckStatus::Error => ("[XX]", color::RED),
        };

        print!("{}{}{} {}", color, icon, color::RESET, self.label);
        if let Some(ref detail) = self.detail {
            print!(": {}", detail);
        }
        println!();
    }

    fn is_error(&self) -> bool {
        self.status == CheckStatus::Error
    }
}

/// Run the doctor command.
pub fn run(config: &Config) -> Result<()> {
    println!();
    println!("{}Syncrop Indicator - Health Check{}", color::BOLD, color::RESET);
    println!("{}", "=".repeat(40));
    println!();

    let checks = [
        check_config_file(&config.path),
        check_icon(&config.icon_path),
        check_program("Log opener", &config.opener),
        check_program("Companion GUI", &config.companion),
        check_log_file(config),
    ];

    for check in &checks {
        check.print();
    }
    println!();

    let failed = checks.iter().filter(|c| c.is_error()).count();
    if failed > 0 {
        anyhow::bail!("{} check(s) failed", failed);
    }

    println!("All required checks passed.");
    Ok(())
}

fn check_config_file(path: &Path) -> CheckResult {
    if path.exists() {
        CheckResult::ok("Config file", path.display().to_string())
    } else {
        CheckResult::ok("Config file", format!("{} (absent, using defaults)", path.display()))
    }
}

fn check_icon(path: &Path) -> CheckResult {
    match icon::read(path) {
        Ok(_) => CheckResult::ok("Tray icon", path.display().to_string()),
        Err(e) => CheckResult::warning("Tray icon", format!("{} (placeholder will be used)", e)),
    }
}

fn check_program(label: &str, program: &str) -> CheckResult {
    match which::which(program) {
        Ok(path) => CheckResult::ok(label, path.display().to_string()),
        Err(_) => CheckResult::error(label, format!("'{}' not found on PATH", program)),
    }
}

fn check_log_file(config: &Config) -> CheckResult {
    let target = config.log_target();
    let shown = target.to_string_lossy().into_owned();

    if !config.expand_home && config.log_file.starts_with('~') {
        return CheckResult::warning(
            "Log file",
            format!("'{}' is passed without home expansion (see expand_home)", shown),
        );
    }

    if Path::new(&target).exists() {
        CheckResult::ok("Log file", shown)
    } else {
        CheckResult::warning("Log file", format!("{} does not exist yet", shown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_error() {
        let check = check_program("Companion GUI", "syncrop-indicator-test-no-such-program");
        assert!(check.is_error());
    }

    #[test]
    fn test_literal_tilde_is_warning() {
        let check = check_log_file(&Config::default());
        assert_eq!(check.status, CheckStatus::Warning);
        assert!(check.detail.unwrap().contains("without home expansion"));
    }

    #[test]
    fn test_existing_log_file_is_ok() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config {
            log_file: file.path().display().to_string(),
            ..Config::default()
        };
        assert_eq!(check_log_file(&config).status, CheckStatus::Ok);
    }

    #[test]
    fn test_missing_icon_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let check = check_icon(&dir.path().join("syncrop.png"));
        assert_eq!(check.status, CheckStatus::Warning);
    }

    #[test]
    fn test_absent_config_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let check = check_config_file(&dir.path().join("indicator.toml"));
        assert_eq!(check.status, CheckStatus::Ok);
        assert!(check.detail.unwrap().contains("using defaults"));
    }
}
