use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

const PID_FILE_NAME: &str = "centerwin.pid";

/// Returns the centerwin data directory, creating it if needed.
///
/// On Windows: `%LOCALAPPDATA%\centerwin`.
fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().ok_or("could not determine local data directory")?;
    let dir = base.join("centerwin");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the path to the PID file.
pub fn pid_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(PID_FILE_NAME))
}

/// Writes the current process's PID to the PID file.
///
/// Called when the daemon starts so `stop` and `status` can find it.
pub fn write_pid_file() -> Result<()> {
    write_pid_to(&pid_path()?, std::process::id())
}

/// Reads the PID from the PID file, if it exists.
pub fn read_pid_file() -> Result<Option<u32>> {
    read_pid_from(&pid_path()?)
}

/// Removes the PID file. Called when the daemon shuts down cleanly.
pub fn remove_pid_file() -> Result<()> {
    let path = pid_path()?;
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

fn write_pid_to(path: &Path, pid: u32) -> Result<()> {
    fs::write(path, pid.to_string())?;
    Ok(())
}

fn read_pid_from(path: &Path) -> Result<Option<u32>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let pid = contents
        .trim()
        .parse()
        .map_err(|e| format!("invalid PID file contents: {e}"))?;

    Ok(Some(pid))
}
