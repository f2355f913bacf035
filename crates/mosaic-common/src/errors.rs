use std::path::PathBuf;

use crate::types::{PageId, WindowId};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config write error: {0}")]
    WriteError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("invalid accelerator: {0}")]
    AcceleratorError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Failures of shell operations. Only `CapacityExceeded` and `LastPage`
/// are ever shown to the user; the rest are logged and dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShellError {
    #[error("a page can hold at most {max} tabs")]
    CapacityExceeded { max: usize },

    #[error("unknown page: {0}")]
    UnknownPage(PageId),

    #[error("unknown window: {0}")]
    UnknownWindow(WindowId),

    #[error("cannot delete {0}: it is the last page")]
    LastPage(PageId),

    #[error("tab index {index} out of range (count {count})")]
    InvalidTabIndex { index: usize, count: usize },

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
