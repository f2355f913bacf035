pub mod actions;
pub mod errors;
pub mod types;

pub use actions::{Action, HotkeyAction};
pub use errors::{ConfigError, MosaicError, PlatformError, ShellError};
pub use types::{ClickPoint, PageId, Rect, SurfaceId, WindowId};

pub type Result<T> = std::result::Result<T, MosaicError>;
