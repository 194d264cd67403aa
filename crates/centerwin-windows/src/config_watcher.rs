//! Applies config file edits to the running daemon.
//!
//! Uses `FindFirstChangeNotificationW` on the config directory. When a
//! change is reported, the file's mtime decides whether it was ours, and
//! only configs that parse are applied.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use centerwin_core::config::{self, Config};
use centerwin_core::Settings;
use windows::Win32::Foundation::WAIT_OBJECT_0;
use windows::Win32::Storage::FileSystem::{
    FILE_NOTIFY_CHANGE_FILE_NAME, FILE_NOTIFY_CHANGE_LAST_WRITE, FindCloseChangeNotification,
    FindFirstChangeNotificationW, FindNextChangeNotification,
};
use windows::Win32::System::Threading::WaitForSingleObject;
use windows::core::HSTRING;

/// Timeout between quit-signal checks when nothing changes (ms).
const WAIT_TIMEOUT_MS: u32 = 250;

/// Runs until the quit signal is raised.
pub fn watch(settings: Arc<Settings>) {
    let (Some(dir), Some(path)) = (config::config_dir(), config::config_path()) else {
        tracing::info!("config dir not found, watcher exiting");
        return;
    };
    if let Err(e) = fs::create_dir_all(&dir) {
        tracing::warn!("cannot create {}: {e}", dir.display());
        return;
    }

    let mut last_mtime = mtime(&path);

    let dir_str = HSTRING::from(dir.as_os_str());
    let flags = FILE_NOTIFY_CHANGE_LAST_WRITE | FILE_NOTIFY_CHANGE_FILE_NAME;

    // SAFETY: `dir_str` outlives the call.
    let Ok(handle) = (unsafe { FindFirstChangeNotificationW(&dir_str, false, flags) }) else {
        tracing::warn!("FindFirstChangeNotificationW failed, live reload disabled");
        return;
    };

    while !settings.should_quit() {
        // SAFETY: `handle` stays open until FindCloseChangeNotification.
        if unsafe { WaitForSingleObject(handle, WAIT_TIMEOUT_MS) } != WAIT_OBJECT_0 {
            continue;
        }

        let current = mtime(&path);
        if current != last_mtime {
            last_mtime = current;
            match config::try_load_from(&path) {
                Ok(config) => apply(&config, &settings),
                Err(e) => tracing::warn!("config.toml invalid, keeping current settings: {e}"),
            }
        }

        // SAFETY: re-arms the same notification handle.
        if unsafe { FindNextChangeNotification(handle) }.is_err() {
            tracing::warn!("FindNextChangeNotification failed, live reload stopped");
            break;
        }
    }

    // SAFETY: we own the handle.
    unsafe {
        let _ = FindCloseChangeNotification(handle);
    }
}

/// Pushes the live-reloadable parts of `config` into the shared settings.
///
/// Detection and settle timings are read at startup only.
fn apply(config: &Config, settings: &Settings) {
    let mode = config.display_mode();
    if settings.mode() != mode {
        settings.set_mode(mode);
    }
    settings.set_extra_ignore_titles(&config.extra_ignore_titles);
    tracing::info!(
        ?mode,
        extra_ignore_titles = config.extra_ignore_titles.len(),
        "config reloaded"
    );
}

fn mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}
