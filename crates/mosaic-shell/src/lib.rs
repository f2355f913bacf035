//! The browser shell core.
//!
//! Owns pages, per-window surface pools and overlay state, and turns
//! [`Action`](mosaic_common::Action)s into calls on a [`Backend`]. Everything
//! runs on one thread: the host feeds events in, calls [`Shell::tick`] when
//! [`Shell::next_deadline`] passes, and the shell never blocks.

pub mod backend;
pub mod bridge;
mod composer;
pub mod messages;
pub mod pages;
pub mod scheduler;
pub mod search;
pub mod window;

#[cfg(test)]
mod testing;

pub use backend::{
    Backend, ChromeTarget, CssKey, FocusOwner, OverlayKind, OverlayLevel, SurfaceEvent,
    SurfaceRole, SurfaceSpec, WindowGeometry,
};
pub use composer::{IpcSource, Shell};
pub use messages::{ChromeMessage, HeaderState, PageEntry};
pub use pages::PageRegistry;
pub use scheduler::{Scheduler, Task};
pub use window::{SurfacePool, WindowState};
