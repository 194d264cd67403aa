use std::time::Duration;

use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_ACCESS_RIGHTS, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_SYNCHRONIZE,
    PROCESS_TERMINATE, TerminateProcess, WaitForSingleObject,
};

/// Checks whether a process with the given PID is still alive.
///
/// Used to tell a running daemon from a stale PID file left behind by
/// one that was killed without a clean shutdown.
pub fn is_process_alive(pid: u32) -> bool {
    with_process(pid, PROCESS_QUERY_LIMITED_INFORMATION, |_| true).unwrap_or(false)
}

/// Waits up to `timeout` for the process to exit.
///
/// Returns `true` if it exited (or was already gone).
pub fn wait_for_exit(pid: u32, timeout: Duration) -> bool {
    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    with_process(pid, PROCESS_SYNCHRONIZE, |handle| {
        // SAFETY: `handle` was opened with SYNCHRONIZE access.
        unsafe { WaitForSingleObject(handle, millis) == WAIT_OBJECT_0 }
    })
    .unwrap_or(true)
}

/// Terminates the process. Last resort when the stop event goes unanswered.
pub fn kill_process(pid: u32) -> bool {
    with_process(pid, PROCESS_TERMINATE, |handle| {
        // SAFETY: `handle` was opened with TERMINATE access.
        unsafe { TerminateProcess(handle, 1) }.is_ok()
    })
    .unwrap_or(false)
}

/// Opens the process with `access`, runs `f`, and closes the handle.
/// Returns `None` if the process can't be opened.
fn with_process<T>(pid: u32, access: PROCESS_ACCESS_RIGHTS, f: impl FnOnce(HANDLE) -> T) -> Option<T> {
    // SAFETY: OpenProcess fails cleanly for unknown PIDs.
    let handle = unsafe { OpenProcess(access, false, pid) }.ok()?;
    let result = f(handle);
    // SAFETY: we own the handle.
    unsafe {
        let _ = CloseHandle(handle);
    }
    Some(result)
}
