//! Console control handler using `SetConsoleCtrlHandler`.

use std::sync::{Arc, OnceLock};

use centerwin_core::{Result, Settings};
use windows::Win32::System::Console::{
    CTRL_BREAK_EVENT, CTRL_C_EVENT, CTRL_CLOSE_EVENT, SetConsoleCtrlHandler,
};
use windows::core::BOOL;

/// Written once by `set_handler`, read by the callback.
static SETTINGS: OnceLock<Arc<Settings>> = OnceLock::new();

/// Raises the quit signal on Ctrl+C, Ctrl+Break or console close.
///
/// Can be registered once per process.
pub fn set_handler(settings: Arc<Settings>) -> Result<()> {
    SETTINGS
        .set(settings)
        .map_err(|_| "Ctrl+C handler already registered")?;

    // SAFETY: `handler` is a plain function that only reads SETTINGS.
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }.map_err(|e| e.message())?;
    Ok(())
}

unsafe extern "system" fn handler(ctrl_type: u32) -> BOOL {
    let handled = matches!(ctrl_type, CTRL_C_EVENT | CTRL_BREAK_EVENT | CTRL_CLOSE_EVENT);
    if handled && let Some(settings) = SETTINGS.get() {
        settings.quit();
    }
    BOOL(handled as i32)
}
