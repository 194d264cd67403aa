//! Resolves which rectangle a window should be centered in.

use crate::{DisplayMode, Rect, WindowHandle};

/// The two rectangles a monitor exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorRects {
    /// Full monitor bounds.
    pub full: Rect,
    /// Bounds minus the taskbar and any docked app bars.
    pub work: Rect,
}

impl MonitorRects {
    /// Picks the rectangle that matches the display mode.
    pub fn select(&self, mode: DisplayMode) -> Rect {
        match mode {
            DisplayMode::RespectWorkArea => self.work,
            DisplayMode::FullMonitor => self.full,
        }
    }
}

/// Platform monitor lookup.
pub trait MonitorQuery {
    /// Returns the rectangles of the monitor nearest to the window,
    /// or `None` if the lookup fails.
    fn monitor_for(&self, handle: WindowHandle) -> Option<MonitorRects>;

    /// Returns the full bounds of the primary display, origin at (0, 0).
    fn primary_bounds(&self) -> Rect;
}

impl<T: MonitorQuery + ?Sized> MonitorQuery for &T {
    fn monitor_for(&self, handle: WindowHandle) -> Option<MonitorRects> {
        (**self).monitor_for(handle)
    }

    fn primary_bounds(&self) -> Rect {
        (**self).primary_bounds()
    }
}

/// Returns the area a window should be centered in.
///
/// Falls back to the primary display's full bounds when the monitor
/// can't be resolved. That fallback is logged but never fails placement.
pub fn usable_area(monitors: &impl MonitorQuery, handle: WindowHandle, mode: DisplayMode) -> Rect {
    match monitors.monitor_for(handle) {
        Some(rects) => rects.select(mode),
        None => {
            let fallback = monitors.primary_bounds();
            tracing::debug!(%handle, ?fallback, "monitor lookup failed, using primary display");
            fallback
        }
    }
}
