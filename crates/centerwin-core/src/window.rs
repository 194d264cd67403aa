use std::fmt;

use crate::{Result, Size};

/// Title reported when the platform cannot read a window's text.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// An opaque identifier for a native top-level window.
///
/// On Windows this is the `HWND` value. Two handles are equal when they
/// refer to the same OS window; the handle says nothing about the
/// window's content and stops being meaningful once the window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub usize);

impl WindowHandle {
    pub fn raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Platform window queries and the single mutation the engine performs.
///
/// Each platform crate (e.g. `centerwin-windows`) provides its own
/// implementation. None of these calls may panic or abort detection:
/// lookups degrade to sentinels, and the two fallible calls return
/// `Result` so callers decide how to log them.
pub trait WindowQuery {
    /// Returns the window title, or [`UNKNOWN_TITLE`] if it can't be read.
    fn title(&self, handle: WindowHandle) -> String;

    /// Returns the current outer size of the window.
    ///
    /// Fails with [`crate::Error::WindowGone`] once the window is destroyed.
    fn size(&self, handle: WindowHandle) -> Result<Size>;

    /// Returns whether the window is maximized. Vanished windows are not.
    fn is_maximized(&self, handle: WindowHandle) -> bool;

    /// Returns whether the window is currently visible.
    fn is_visible(&self, handle: WindowHandle) -> bool;

    /// Returns whether the window is an application window, the kind that
    /// shows up in the taskbar and Alt+Tab. Menus, tooltips, dropdowns and
    /// tool windows are not.
    fn is_app_window(&self, handle: WindowHandle) -> bool;

    /// Moves the window so its top-left corner lands at `(x, y)`.
    ///
    /// The size is left untouched.
    fn move_to(&self, handle: WindowHandle, x: i32, y: i32) -> Result<()>;

    /// Snapshots every live top-level window, visible or not.
    fn enumerate_top_level_windows(&self) -> Vec<WindowHandle>;
}

impl<T: WindowQuery + ?Sized> WindowQuery for &T {
    fn title(&self, handle: WindowHandle) -> String {
        (**self).title(handle)
    }

    fn size(&self, handle: WindowHandle) -> Result<Size> {
        (**self).size(handle)
    }

    fn is_maximized(&self, handle: WindowHandle) -> bool {
        (**self).is_maximized(handle)
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        (**self).is_visible(handle)
    }

    fn is_app_window(&self, handle: WindowHandle) -> bool {
        (**self).is_app_window(handle)
    }

    fn move_to(&self, handle: WindowHandle, x: i32, y: i32) -> Result<()> {
        (**self).move_to(handle, x, y)
    }

    fn enumerate_top_level_windows(&self) -> Vec<WindowHandle> {
        (**self).enumerate_top_level_windows()
    }
}
