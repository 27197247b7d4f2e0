//! Linux tray as a StatusNotifierItem (ksni).
//!
//! The desktop shell reports a primary click as `Activate` and a middle
//! click as `SecondaryActivate`; the context menu is exported over D-Bus.
//! ksni serves the item from its own thread and serializes every callback
//! through the tray value, so the dispatcher is only ever touched by one
//! thread at a time.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::time::Duration;

use tracing::{debug, info};

use super::icon;
use crate::dispatch::{ActivationReason, Dispatcher, Flow, MenuAction};
use crate::error::TrayError;
use crate::launcher::Launcher;

/// How often exited children are reaped while idle.
const REAP_INTERVAL: Duration = Duration::from_secs(1);

struct SyncropTray<L> {
    dispatcher: Dispatcher<L>,
    pixmap: ksni::Icon,
    quit: Sender<()>,
}

impl<L: Launcher> SyncropTray<L> {
    fn handle(&mut self, flow: Flow) {
        if flow == Flow::Exit {
            // The receiver only goes away once the main thread is exiting
            let _ = self.quit.send(());
        }
    }

    fn on_menu(&mut self, action: MenuAction) {
        let flow = self.dispatcher.on_menu(action);
        self.handle(flow);
    }

    fn on_activation(&mut self, reason: ActivationReason) {
        let flow = self.dispatcher.on_activation(reason);
        self.handle(flow);
    }
}

impl<L: Launcher + Send + 'static> ksni::Tray for SyncropTray<L> {
    fn id(&self) -> String {
        "syncrop-indicator".to_string()
    }

    fn title(&self) -> String {
        self.dispatcher.config().tooltip.clone()
    }

    fn icon_pixmap(&self) -> Vec<ksni::Icon> {
        vec![self.pixmap.clone()]
    }

    fn tool_tip(&self) -> ksni::ToolTip {
        ksni::ToolTip {
            title: self.dispatcher.config().tooltip.clone(),
            ..Default::default()
        }
    }

    fn activate(&mut self, _x: i32, _y: i32) {
        self.on_activation(ActivationReason::Trigger);
    }

    fn secondary_activate(&mut self, _x: i32, _y: i32) {
        self.on_activation(ActivationReason::MiddleClick);
    }

    fn menu(&self) -> Vec<ksni::MenuItem<Self>> {
        MenuAction::ALL
            .into_iter()
            .map(|action| {
                ksni::menu::StandardItem {
                    label: action.label().to_string(),
                    activate: Box::new(move |tray: &mut Self| tray.on_menu(action)),
                    ..Default::default()
                }
                .into()
            })
            .collect()
    }
}

pub fn run<L: Launcher + Send + 'static>(dispatcher: Dispatcher<L>) -> Result<(), TrayError> {
    let image = icon::read_or_placeholder(&dispatcher.config().icon_path);
    let (quit_tx, quit_rx) = mpsc::channel();

    let tray = SyncropTray {
        dispatcher,
        pixmap: image.to_pixmap(),
        quit: quit_tx,
    };

    let service = ksni::TrayService::new(tray);
    let handle = service.handle();
    let worker = std::thread::Builder::new()
        .name("ksni".to_string())
        .spawn(move || service.run())
        .map_err(|e| TrayError::Toolkit(e.to_string()))?;

    info!("StatusNotifierItem registered");

    loop {
        match quit_rx.recv_timeout(REAP_INTERVAL) {
            Ok(()) => {
                debug!("Quit requested, leaving tray loop");
                return Ok(());
            }
            Err(RecvTimeoutError::Timeout) => handle.update(|tray| tray.dispatcher.tick()),
            Err(RecvTimeoutError::Disconnected) => {
                // The service thread ended and dropped the tray
                return match worker.join() {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(TrayError::Toolkit(e.to_string())),
                    Err(_) => Err(TrayError::Toolkit("tray service thread panicked".to_string())),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::launcher::MockLauncher;
    use ksni::Tray;
    use std::ffi::OsStr;

    fn tray(launcher: MockLauncher) -> (SyncropTray<MockLauncher>, mpsc::Receiver<()>) {
        let (quit, rx) = mpsc::channel();
        let tray = SyncropTray {
            dispatcher: Dispatcher::new(Config::default(), launcher),
            pixmap: icon::placeholder().to_pixmap(),
            quit,
        };
        (tray, rx)
    }

    fn labels(items: &[ksni::MenuItem<SyncropTray<MockLauncher>>]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                ksni::MenuItem::Standard(item) => item.label.clone(),
                _ => String::new(),
            })
            .collect()
    }

    fn select(tray: &mut SyncropTray<MockLauncher>, label: &str) {
        let items = tray.menu();
        let item = items
            .iter()
            .find_map(|item| match item {
                ksni::MenuItem::Standard(item) if item.label == label => Some(item),
                _ => None,
            })
            .unwrap();
        (item.activate)(tray);
    }

    #[test]
    fn test_menu_has_two_actions_in_order() {
        let (tray, _rx) = tray(MockLauncher::new());
        assert_eq!(labels(&tray.menu()), ["Open log file", "Quit"]);
    }

    #[test]
    fn test_primary_click_spawns_companion() {
        let mut launcher = MockLauncher::new();
        launcher
            .expect_spawn()
            .withf(|program| program == "syncrop-gui")
            .times(1)
            .returning(|_| Ok(()));

        let (mut tray, rx) = tray(launcher);
        tray.activate(10, 10);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_middle_click_does_not_spawn() {
        let mut launcher = MockLauncher::new();
        launcher.expect_spawn().never();

        let (mut tray, _rx) = tray(launcher);
        tray.secondary_activate(10, 10);
    }

    #[test]
    fn test_quit_item_signals_exit() {
        let mut launcher = MockLauncher::new();
        launcher.expect_open().never();

        let (mut tray, rx) = tray(launcher);
        select(&mut tray, "Quit");
        assert_eq!(rx.try_recv(), Ok(()));
    }

    #[test]
    fn test_open_log_item_runs_opener() {
        let mut launcher = MockLauncher::new();
        launcher
            .expect_open()
            .withf(|opener, target| {
                opener == "xdg-open" && target == OsStr::new("~/.syncrop/syncrop.log")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let (mut tray, rx) = tray(launcher);
        select(&mut tray, "Open log file");
        assert!(rx.try_recv().is_err());
    }
}
