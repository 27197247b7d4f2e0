//! Windows / macOS tray on tray-icon and winit.

use std::time::{Duration, Instant};

use tracing::{error, info, warn};
use tray_icon::menu::{Menu, MenuEvent, MenuItem};
use tray_icon::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use super::{icon, Button, ClickFilter, IconClick};
use crate::config::Config;
use crate::dispatch::{Dispatcher, Flow, MenuAction};
use crate::error::TrayError;
use crate::launcher::Launcher;

/// How often the event loop drains the tray event channels.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn build_menu() -> Result<Menu, TrayError> {
    let menu = Menu::new();
    for action in MenuAction::ALL {
        let item = MenuItem::with_id(action.id(), action.label(), true, None);
        menu.append(&item)?;
    }
    Ok(menu)
}

/// Build the tray icon with its context menu.
fn build_tray(config: &Config) -> Result<TrayIcon, TrayError> {
    let menu = build_menu()?;
    let image = icon::read_or_placeholder(&config.icon_path);

    let mut builder = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_menu_on_left_click(false)
        .with_tooltip(&config.tooltip);

    // A bad pixel buffer only costs us the image, not the menu
    match image.into_icon() {
        Ok(icon) => builder = builder.with_icon(icon),
        Err(e) => warn!(error = %e, "Tray icon has no image"),
    }

    let tray = builder.build()?;
    info!(icon = %config.icon_path.display(), "System tray icon created");
    Ok(tray)
}

fn button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

fn icon_click(event: &TrayIconEvent) -> Option<IconClick> {
    match event {
        TrayIconEvent::Click {
            button: b,
            button_state,
            ..
        } => Some(match button_state {
            MouseButtonState::Down => IconClick::Press(button(*b)),
            MouseButtonState::Up => IconClick::Release(button(*b)),
        }),
        TrayIconEvent::DoubleClick { button: b, .. } => Some(IconClick::DoubleClick(button(*b))),
        // Hover events
        _ => None,
    }
}

/// Application state for the tray icon
struct TrayApp<L> {
    tray_icon: Option<TrayIcon>,
    dispatcher: Dispatcher<L>,
    clicks: ClickFilter,
    failure: Option<TrayError>,
}

impl<L: Launcher> TrayApp<L> {
    /// Drain pending menu and icon events into the dispatcher.
    fn pump(&mut self) -> Flow {
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            if self.dispatcher.on_menu_id(event.id.0.as_str()) == Flow::Exit {
                return Flow::Exit;
            }
        }

        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            let reason = icon_click(&event).and_then(|click| self.clicks.reason(click));
            if let Some(reason) = reason {
                if self.dispatcher.on_activation(reason) == Flow::Exit {
                    return Flow::Exit;
                }
            }
        }

        self.dispatcher.tick();
        Flow::Continue
    }
}

impl<L: Launcher> ApplicationHandler for TrayApp<L> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Create tray icon on first resume
        if self.tray_icon.is_some() {
            return;
        }

        match build_tray(self.dispatcher.config()) {
            Ok(tray) => self.tray_icon = Some(tray),
            Err(e) => {
                error!(error = %e, "Failed to create tray icon");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        _event: WindowEvent,
    ) {
        // No windows, just the tray icon
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.pump() == Flow::Exit {
            event_loop.exit();
            return;
        }

        // Menu events do not wake the loop on every platform
        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}

pub fn run<L: Launcher>(dispatcher: Dispatcher<L>) -> Result<(), TrayError> {
    let event_loop = EventLoop::new().map_err(|e| TrayError::Toolkit(e.to_string()))?;
    let mut app = TrayApp {
        tray_icon: None,
        dispatcher,
        clicks: ClickFilter::default(),
        failure: None,
    };

    info!("Entering winit event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| TrayError::Toolkit(e.to_string()))?;

    match app.failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tray_icon::dpi::PhysicalPosition;
    use tray_icon::{Rect, TrayIconId};

    fn id() -> TrayIconId {
        TrayIconId::new("syncrop")
    }

    fn origin() -> PhysicalPosition<f64> {
        PhysicalPosition::new(0.0, 0.0)
    }

    #[test]
    fn test_click_events_map_to_clicks() {
        let event = TrayIconEvent::Click {
            id: id(),
            position: origin(),
            rect: Rect::default(),
            button: MouseButton::Left,
            button_state: MouseButtonState::Up,
        };
        assert_eq!(icon_click(&event), Some(IconClick::Release(Button::Left)));

        let event = TrayIconEvent::Click {
            id: id(),
            position: origin(),
            rect: Rect::default(),
            button: MouseButton::Right,
            button_state: MouseButtonState::Down,
        };
        assert_eq!(icon_click(&event), Some(IconClick::Press(Button::Right)));
    }

    #[test]
    fn test_double_click_event() {
        let event = TrayIconEvent::DoubleClick {
            id: id(),
            position: origin(),
            rect: Rect::default(),
            button: MouseButton::Left,
        };
        assert_eq!(icon_click(&event), Some(IconClick::DoubleClick(Button::Left)));
    }

    #[test]
    fn test_hover_events_are_ignored() {
        let events = [
            TrayIconEvent::Enter {
                id: id(),
                position: origin(),
                rect: Rect::default(),
            },
            TrayIconEvent::Move {
                id: id(),
                position: origin(),
                rect: Rect::default(),
            },
            TrayIconEvent::Leave {
                id: id(),
                position: origin(),
                rect: Rect::default(),
            },
        ];
        for event in &events {
            assert_eq!(icon_click(event), None);
        }
    }

    #[cfg(windows)]
    #[test]
    fn test_menu_ids_in_order() {
        let menu = build_menu().unwrap();
        let ids: Vec<String> = menu.items().iter().map(|item| item.id().0.clone()).collect();
        assert_eq!(ids, ["open_log_file", "quit"]);
    }
}
