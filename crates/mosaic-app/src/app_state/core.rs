//! MosaicApp struct definition and constructor.

use mosaic_config::StateSnapshot;
use mosaic_shell::Shell;

use crate::backend::WinitBackend;

/// Top-level application state.
pub struct MosaicApp {
    pub(super) shell: Shell<WinitBackend>,
    /// Saved session, consumed when the loop first resumes.
    pub(super) snapshot: Option<StateSnapshot>,
    pub(super) started: bool,
    /// winit reports modifiers separately from key presses.
    pub(super) modifiers: winit::keyboard::ModifiersState,
    pub(super) shut_down: bool,
}

impl MosaicApp {
    pub fn new(shell: Shell<WinitBackend>, snapshot: Option<StateSnapshot>) -> Self {
        Self {
            shell,
            snapshot,
            started: false,
            modifiers: winit::keyboard::ModifiersState::empty(),
            shut_down: false,
        }
    }
}
