//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop: winit window events and webview events go into the shell,
//! and the loop wakes up for the shell's next timer.

mod core;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;

pub use self::core::MosaicApp;
