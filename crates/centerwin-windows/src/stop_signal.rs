//! Graceful shutdown request across processes.
//!
//! The daemon owns a named event; `centerwin stop` sets it. A listener
//! thread turns the event into the daemon's quit signal.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use centerwin_core::{Result, Settings};
use windows::Win32::Foundation::{CloseHandle, WAIT_OBJECT_0};
use windows::Win32::System::Threading::{
    CreateEventW, EVENT_MODIFY_STATE, OpenEventW, SetEvent, WaitForSingleObject,
};
use windows::core::{PCWSTR, w};

/// Session-local so one user's stop can't reach another's daemon.
const STOP_EVENT_NAME: PCWSTR = w!("Local\\centerwin-stop");

/// How often the listener re-checks the quit signal (ms).
const WAIT_TIMEOUT_MS: u32 = 250;

/// Creates the stop event and spawns the thread that waits on it.
///
/// The thread exits when the event fires (after raising the quit
/// signal) or when something else raises quit first.
pub fn listen(settings: Arc<Settings>) -> Result<thread::JoinHandle<()>> {
    let (ready_tx, ready_rx) = mpsc::channel::<std::result::Result<(), String>>();

    let thread = thread::Builder::new()
        .name("stop-signal".into())
        .spawn(move || {
            // SAFETY: manual-reset event, initially unset, default security.
            let event = match unsafe { CreateEventW(None, true, false, STOP_EVENT_NAME) } {
                Ok(event) => event,
                Err(e) => {
                    let _ = ready_tx.send(Err(e.message()));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));

            while !settings.should_quit() {
                // SAFETY: `event` stays open until CloseHandle below.
                if unsafe { WaitForSingleObject(event, WAIT_TIMEOUT_MS) } == WAIT_OBJECT_0 {
                    tracing::info!("stop requested");
                    settings.quit();
                }
            }

            // SAFETY: we own the handle.
            unsafe {
                let _ = CloseHandle(event);
            }
        })?;

    ready_rx
        .recv()
        .map_err(|_| "stop listener exited unexpectedly")??;
    Ok(thread)
}

/// Asks a running daemon to shut down.
///
/// Returns `false` if no daemon is listening.
pub fn request_stop() -> bool {
    // SAFETY: OpenEventW fails cleanly when the event doesn't exist.
    let Ok(event) = (unsafe { OpenEventW(EVENT_MODIFY_STATE, false, STOP_EVENT_NAME) }) else {
        return false;
    };

    // SAFETY: `event` was just opened with EVENT_MODIFY_STATE.
    let sent = unsafe { SetEvent(event) }.is_ok();
    unsafe {
        let _ = CloseHandle(event);
    }
    sent
}
