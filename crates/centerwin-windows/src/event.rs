use centerwin_core::WindowHandle;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::EVENT_OBJECT_SHOW;

use crate::window::Window;

/// Object ID of the window itself, as opposed to a caret, cursor or
/// child accessible object.
const OBJID_WINDOW: i32 = 0;

/// Turns a raw WinEvent into a candidate handle.
///
/// Only "object shown" events about a top-level application window
/// qualify; menus, tooltips and tool windows are dropped here.
pub fn translate(event: u32, hwnd: HWND, id_object: i32) -> Option<WindowHandle> {
    if event != EVENT_OBJECT_SHOW || id_object != OBJID_WINDOW || hwnd.is_invalid() {
        return None;
    }

    let window = Window::new(hwnd);
    (window.is_top_level() && window.is_app_window()).then(|| window.handle())
}
