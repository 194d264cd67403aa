use centerwin_core::{MonitorQuery, MonitorRects, Rect, Result, Size, WindowHandle, WindowQuery};

use crate::enumerate::enumerate_windows;
use crate::monitor;
use crate::window::Window;

/// The live Windows desktop, seen through the engine's query traits.
///
/// Stateless: every call goes straight to Win32, so one value can serve
/// as both the window and the monitor adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct Desktop;

impl WindowQuery for Desktop {
    fn title(&self, handle: WindowHandle) -> String {
        Window::from_handle(handle).title()
    }

    fn size(&self, handle: WindowHandle) -> Result<Size> {
        Window::from_handle(handle).size()
    }

    fn is_maximized(&self, handle: WindowHandle) -> bool {
        Window::from_handle(handle).is_maximized()
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        Window::from_handle(handle).is_visible()
    }

    fn is_app_window(&self, handle: WindowHandle) -> bool {
        Window::from_handle(handle).is_app_window()
    }

    fn move_to(&self, handle: WindowHandle, x: i32, y: i32) -> Result<()> {
        Window::from_handle(handle).move_to(x, y)
    }

    fn enumerate_top_level_windows(&self) -> Vec<WindowHandle> {
        enumerate_windows()
    }
}

impl MonitorQuery for Desktop {
    fn monitor_for(&self, handle: WindowHandle) -> Option<MonitorRects> {
        monitor::rects_for_window(Window::from_handle(handle).hwnd())
    }

    fn primary_bounds(&self) -> Rect {
        monitor::primary_bounds()
    }
}
