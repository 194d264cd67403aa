use centerwin_core::WindowHandle;
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

/// Snapshots every top-level window, hidden and minimized ones included.
///
/// The detector's baseline relies on the unfiltered list: a window that
/// exists but is hidden now must still count as "already there" when it
/// is shown later.
pub fn enumerate_windows() -> Vec<WindowHandle> {
    let mut handles: Vec<WindowHandle> = Vec::new();

    // SAFETY: EnumWindows is synchronous, so the Vec behind the LPARAM
    // outlives every callback invocation.
    let result = unsafe {
        EnumWindows(
            Some(collect_handle),
            LPARAM(&mut handles as *mut Vec<WindowHandle> as isize),
        )
    };

    if let Err(e) = result {
        tracing::warn!(collected = handles.len(), "EnumWindows stopped early: {e}");
    }

    handles
}

unsafe extern "system" fn collect_handle(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam carries the Vec from enumerate_windows().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<WindowHandle>) };
    handles.push(WindowHandle(hwnd.0 as usize));
    BOOL(1)
}
