//! Event-to-action dispatch for the tray indicator.
//!
//! Toolkit backends translate native events into [`MenuAction`] and
//! [`ActivationReason`]; everything the indicator does in response lives here.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::launcher::Launcher;

/// Context menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenLogFile,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 2] = [MenuAction::OpenLogFile, MenuAction::Quit];

    /// Stable menu item id.
    pub fn id(self) -> &'static str {
        match self {
            MenuAction::OpenLogFile => "open_log_file",
            MenuAction::Quit => "quit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::OpenLogFile => "Open log file",
            MenuAction::Quit => "Quit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}

/// Why the tray icon was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationReason {
    /// Single primary click
    Trigger,
    DoubleClick,
    /// Secondary click, normally opens the context menu
    Context,
    MiddleClick,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Maps tray events onto process launches.
pub struct Dispatcher<L> {
    config: Config,
    launcher: L,
}

impl<L: Launcher> Dispatcher<L> {
    pub fn new(config: Config, launcher: L) -> Self {
        Self { config, launcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn on_menu(&mut self, action: MenuAction) -> Flow {
        debug!(action = action.id(), "Menu action selected");

        match action {
            MenuAction::OpenLogFile => {
                let target = self.config.log_target();
                if let Err(e) = self.launcher.open(&self.config.opener, &target) {
                    warn!(
                        opener = %self.config.opener,
                        path = %target.to_string_lossy(),
                        error = %e,
                        "Failed to open log file"
                    );
                }
                Flow::Continue
            }
            MenuAction::Quit => {
                info!("User quit the indicator from the tray menu");
                Flow::Exit
            }
        }
    }

    /// Look up a menu action by raw id. Unknown ids are ignored.
    pub fn on_menu_id(&mut self, id: &str) -> Flow {
        match MenuAction::from_id(id) {
            Some(action) => self.on_menu(action),
            None => {
                debug!(id, "Ignoring unknown menu id");
                Flow::Continue
            }
        }
    }

    pub fn on_activation(&mut self, reason: ActivationReason) -> Flow {
        debug!(?reason, "Tray icon activated");

        if reason == ActivationReason::Trigger {
            if let Err(e) = self.launcher.spawn(&self.config.companion) {
                warn!(
                    program = %self.config.companion,
                    error = %e,
                    "Failed to launch companion GUI"
                );
            }
        }
        Flow::Continue
    }

    /// Periodic housekeeping from the event loop.
    pub fn tick(&mut self) {
        self.launcher.reap();
    }
}
