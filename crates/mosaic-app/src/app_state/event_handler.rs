//! `ApplicationHandler` implementation for the winit event loop.

use mosaic_common::WindowId;
use mosaic_platform::KeyCombo;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::Key;

use super::core::MosaicApp;

impl ApplicationHandler for MosaicApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        if let Err(e) = self.shell.start(self.snapshot.take()) {
            tracing::error!(error = %e, "failed to open a window");
            event_loop.exit();
            return;
        }
        self.shell.backend_mut().realize(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(target) = self.shell.backend().target(window_id) else {
            return;
        };
        let window = target.window;
        let is_main = target.overlay.is_none();

        match event {
            WindowEvent::CloseRequested if is_main => {
                tracing::info!(window_id = window.0, "window close requested");
                self.shell.close_window(window);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } if is_main => {
                self.shell.on_resized(window);
                self.sync_window_state(window);
            }

            WindowEvent::Moved(_) if is_main => {
                self.shell.on_moved(window);
            }

            WindowEvent::Focused(focused) => {
                self.shell.backend_mut().set_focused(window_id, focused);
                self.shell.on_focus_changed(window, focused);
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(window, event);
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_and_schedule(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

impl MosaicApp {
    /// Look a key press up in the hotkey table.
    fn handle_keyboard_input(&mut self, window: WindowId, event: KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        let Some(name) = key_name(&event.logical_key) else {
            return;
        };
        let combo = KeyCombo::from_parts(
            self.modifiers.control_key(),
            self.modifiers.alt_key(),
            self.modifiers.shift_key(),
            self.modifiers.super_key(),
            &name,
        );
        if self.shell.handle_key(window, &combo) {
            tracing::trace!(key = %name, "hotkey consumed");
        }
    }

    /// Report maximize/fullscreen changes made by the window manager.
    fn sync_window_state(&mut self, window: WindowId) {
        let (maximized, fullscreen) = self.shell.backend_mut().poll_window_state(window);
        if let Some(maximized) = maximized {
            self.shell.on_maximize_changed(window, maximized);
        }
        if let Some(fullscreen) = fullscreen {
            self.shell.on_fullscreen_changed(window, fullscreen);
        }
    }
}

/// The DOM-style name of a winit logical key.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(named) => Some(format!("{named:?}")),
        Key::Character(c) => Some(c.to_string()),
        _ => None,
    }
}
