//! The shell coordinator.
//!
//! [`Shell`] is split across files the way one large state object is
//! usually split: `core` owns the struct and window lifecycle, `layout`
//! geometry, `pages` and `tabs` the page/tab state machine, `overlays` the
//! popup/search/settings windows, `router` inbound actions, `events`
//! surface callbacks, and `persist` the state snapshot.

mod core;
mod events;
mod layout;
mod overlays;
mod pages;
mod persist;
mod router;
mod tabs;

pub use self::core::Shell;
pub use router::IpcSource;

#[cfg(test)]
mod tests;
