//! System tray icon.
//!
//! The icon and its two-entry context menu are built once at startup.
//! Linux publishes a StatusNotifierItem over D-Bus with ksni; Windows and
//! macOS use tray-icon on a winit event loop. Both hand their events to the
//! [`Dispatcher`].

use crate::config::Config;
use crate::dispatch::{ActivationReason, Dispatcher};
use crate::error::TrayError;
use crate::launcher::ProcessLauncher;

pub mod icon;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod tray_icon_impl;

#[cfg_attr(target_os = "linux", allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// Raw mouse activity on the icon, as reported by click-level backends.
#[cfg_attr(target_os = "linux", allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconClick {
    Press(Button),
    Release(Button),
    DoubleClick(Button),
}

/// Turns raw clicks into activation reasons.
///
/// Clicks fire on release. A double click arrives as release, double click,
/// release; the second release is swallowed so it does not count as another
/// trigger.
#[cfg_attr(target_os = "linux", allow(dead_code))]
#[derive(Debug, Default)]
pub struct ClickFilter {
    ignore_next_release: bool,
}

#[cfg_attr(target_os = "linux", allow(dead_code))]
impl ClickFilter {
    pub fn reason(&mut self, click: IconClick) -> Option<ActivationReason> {
        match click {
            IconClick::Press(_) => None,
            IconClick::DoubleClick(Button::Left) => {
                self.ignore_next_release = true;
                Some(ActivationReason::DoubleClick)
            }
            IconClick::DoubleClick(_) => None,
            IconClick::Release(Button::Left) => {
                if std::mem::take(&mut self.ignore_next_release) {
                    None
                } else {
                    Some(ActivationReason::Trigger)
                }
            }
            IconClick::Release(Button::Right) => Some(ActivationReason::Context),
            IconClick::Release(Button::Middle) => Some(ActivationReason::MiddleClick),
        }
    }
}

/// Run the tray indicator until "Quit" is selected.
pub fn run_tray(config: Config) -> Result<(), TrayError> {
    tracing::info!("Starting Syncrop tray indicator");
    let dispatcher = Dispatcher::new(config, ProcessLauncher::new());

    #[cfg(target_os = "linux")]
    {
        linux::run(dispatcher)
    }
    #[cfg(not(target_os = "linux"))]
    {
        tray_icon_impl::run(dispatcher)
    }
}
