use std::mem;

use centerwin_core::{MonitorRects, Rect};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, HMONITOR, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromWindow,
};
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

/// Returns the full and work-area rectangles of the monitor nearest to
/// the window, or `None` if the monitor can't be queried.
///
/// The work area excludes the taskbar and any docked toolbars.
pub fn rects_for_window(hwnd: HWND) -> Option<MonitorRects> {
    // SAFETY: MonitorFromWindow accepts any HWND; with
    // MONITOR_DEFAULTTONEAREST it returns a monitor for off-screen windows.
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    rects_for_monitor(monitor)
}

/// Returns the full bounds of the primary display, origin at (0, 0).
pub fn primary_bounds() -> Rect {
    // SAFETY: GetSystemMetrics is a plain query.
    let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    Rect::new(0, 0, width, height)
}

/// Queries both rectangles for a given monitor handle.
fn rects_for_monitor(monitor: HMONITOR) -> Option<MonitorRects> {
    if monitor.is_invalid() {
        return None;
    }

    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the MONITORINFO struct with
    // monitor dimensions. We set cbSize as required by the API.
    let success = unsafe { GetMonitorInfoW(monitor, &mut info) };
    if !success.as_bool() {
        return None;
    }

    let full = info.rcMonitor;
    let work = info.rcWork;
    Some(MonitorRects {
        full: Rect::from_edges(full.left, full.top, full.right, full.bottom),
        work: Rect::from_edges(work.left, work.top, work.right, work.bottom),
    })
}
