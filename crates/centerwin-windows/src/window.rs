use centerwin_core::window::UNKNOWN_TITLE;
use centerwin_core::{Error, Result, Size, WindowHandle};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GA_ROOT, GWL_EXSTYLE, GWL_STYLE, GetAncestor, GetWindowLongPtrW, GetWindowTextLengthW,
    GetWindowTextW, IsWindow, IsWindowVisible, IsZoomed, SWP_NOACTIVATE, SWP_NOOWNERZORDER,
    SWP_NOSIZE, SWP_NOZORDER, SetWindowPos, WS_CAPTION, WS_EX_TOOLWINDOW,
};

use crate::frame;

/// A window on the Windows platform, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle: a number that identifies a window to the OS.
/// This struct holds that handle and queries the OS on every call, so it
/// never serves a stale size.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    /// Creates a new `Window` from a raw `HWND`.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Creates a new `Window` from a platform-agnostic handle.
    pub fn from_handle(handle: WindowHandle) -> Self {
        Self {
            hwnd: HWND(handle.raw() as *mut _),
        }
    }

    /// Returns the raw window handle.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn handle(&self) -> WindowHandle {
        WindowHandle(self.hwnd.0 as usize)
    }

    /// Whether the handle still refers to an existing window.
    pub fn is_alive(&self) -> bool {
        // SAFETY: IsWindow accepts any value, including stale handles.
        unsafe { IsWindow(Some(self.hwnd)).as_bool() }
    }

    /// Whether this window has no parent, i.e. it is its own root.
    pub fn is_top_level(&self) -> bool {
        // SAFETY: GetAncestor returns a null HWND for invalid handles.
        let root = unsafe { GetAncestor(self.hwnd, GA_ROOT) };
        !self.hwnd.is_invalid() && root == self.hwnd
    }

    /// Whether this is a window a user would recognize as an application:
    /// it has a caption bar (`WS_CAPTION`) and is not a tool window
    /// (`WS_EX_TOOLWINDOW`). Rules out menus, tooltips, dropdowns and
    /// floating toolbars.
    pub fn is_app_window(&self) -> bool {
        // SAFETY: GetWindowLongPtrW only reads window data; it returns 0
        // for destroyed handles, which fails the caption test.
        let (style, ex_style) = unsafe {
            (
                GetWindowLongPtrW(self.hwnd, GWL_STYLE) as u32,
                GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32,
            )
        };

        let has_caption = style & WS_CAPTION.0 == WS_CAPTION.0;
        let is_tool = ex_style & WS_EX_TOOLWINDOW.0 != 0;
        has_caption && !is_tool
    }

    /// Returns the window title, or [`UNKNOWN_TITLE`] if the window is gone.
    pub fn title(&self) -> String {
        if !self.is_alive() {
            return UNKNOWN_TITLE.to_string();
        }

        // SAFETY: GetWindowTextLengthW and GetWindowTextW are safe to call
        // with any HWND. They read window text without modifying state.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length <= 0 {
                return String::new();
            }

            // +1 for the null terminator that Windows requires
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
        }
    }

    /// Returns the size of the visible frame (without drop shadows).
    pub fn size(&self) -> Result<Size> {
        if !self.is_alive() {
            return Err(Error::WindowGone(self.handle()));
        }
        let rect = frame::visible_rect(self.hwnd).map_err(|_| Error::WindowGone(self.handle()))?;
        Ok(Size::new(rect.width, rect.height))
    }

    pub fn is_maximized(&self) -> bool {
        // SAFETY: IsZoomed is a simple query; it returns FALSE for
        // destroyed windows.
        unsafe { IsZoomed(self.hwnd).as_bool() }
    }

    pub fn is_visible(&self) -> bool {
        // SAFETY: IsWindowVisible is a simple query that returns a BOOL.
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    /// Moves the visible frame's top-left corner to `(x, y)`.
    ///
    /// Compensates for invisible borders so the visible portion lands
    /// exactly where requested. The size, Z-order and activation state
    /// are left alone.
    pub fn move_to(&self, x: i32, y: i32) -> Result<()> {
        let handle = self.handle();
        let border = frame::border_offset(self.hwnd).unwrap_or_default();

        let flags = SWP_NOSIZE | SWP_NOZORDER | SWP_NOOWNERZORDER | SWP_NOACTIVATE;

        tracing::trace!(
            %handle,
            x,
            y,
            border_left = border.left,
            border_top = border.top,
            "SetWindowPos"
        );

        // SAFETY: SetWindowPos fails cleanly for invalid handles and for
        // windows of higher-integrity processes.
        unsafe { SetWindowPos(self.hwnd, None, x - border.left, y - border.top, 0, 0, flags) }
            .map_err(|e| Error::MoveFailed {
                handle,
                reason: e.message(),
            })
    }
}
