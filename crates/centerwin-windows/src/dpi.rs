use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

/// Opts the process into per-monitor DPI awareness (V2).
///
/// Window and monitor rectangles are then reported in physical pixels,
/// so the centering math holds on every monitor of a mixed-DPI setup.
/// Call once, before any other Win32 query.
pub fn enable_dpi_awareness() {
    // SAFETY: no pointers involved. Failure means awareness was already
    // set (e.g. by a manifest), which is fine.
    if let Err(e) = unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) } {
        tracing::debug!("DPI awareness not changed: {e}");
    }
}
