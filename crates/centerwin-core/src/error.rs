use std::path::PathBuf;

use thiserror::Error;

use crate::WindowHandle;

/// Errors surfaced by the engine and its platform adapters.
///
/// Per-window variants (`WindowGone`, `MoveFailed`) are always handled
/// locally by the detector and never end the monitoring loop.
/// `HookInstall` is the one startup failure the daemon reports as fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// The handle no longer resolves to a live window.
    #[error("window {0} no longer exists")]
    WindowGone(WindowHandle),

    /// The OS rejected a reposition request.
    #[error("failed to move window {handle}: {reason}")]
    MoveFailed {
        handle: WindowHandle,
        reason: String,
    },

    /// The window-shown notification hook could not be installed.
    #[error("failed to install window event hook: {0}")]
    HookInstall(String),

    /// The config file exists but could not be parsed or written.
    #[error("{path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other platform call failure (PID file, process control, ...).
    #[error("{0}")]
    Platform(String),
}

impl From<&str> for Error {
    fn from(message: &str) -> Self {
        Self::Platform(message.to_string())
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Self::Platform(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
