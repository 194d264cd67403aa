//! Win32 implementation of the centerwin adapters and daemon.
#![cfg(windows)]

/// Console Ctrl+C handling.
pub mod ctrl_c;

/// Live config reload.
pub mod config_watcher;

/// Daemon main loop.
pub mod daemon;

/// `WindowQuery` and `MonitorQuery` for the live desktop.
pub mod desktop;

pub mod dpi;

/// Win32 window enumeration.
pub mod enumerate;

/// WinEvent translation.
pub mod event;

/// Show-event hook source.
pub mod event_loop;

/// Visible-frame geometry.
pub mod frame;

pub mod monitor;

/// Process utilities (alive check, wait, kill).
pub mod process;

/// Named stop event shared by the daemon and `centerwin stop`.
pub mod stop_signal;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use desktop::Desktop;
pub use enumerate::enumerate_windows;
pub use event_loop::WinEventSource;
pub use window::Window;
