#[cfg(windows)]
pub fn execute() {
    use std::time::Duration;

    use centerwin_core::pid;
    use centerwin_windows::{process, stop_signal};

    /// How long the daemon gets to finish its current window.
    const GRACE_PERIOD: Duration = Duration::from_secs(3);

    let pid = match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => pid,
        Ok(Some(_)) => {
            let _ = pid::remove_pid_file();
            println!("centerwin is not running (cleaned up stale PID file).");
            return;
        }
        _ => {
            println!("centerwin is not running.");
            return;
        }
    };

    // Graceful first: the daemon unhooks and removes its own PID file.
    if stop_signal::request_stop() && process::wait_for_exit(pid, GRACE_PERIOD) {
        println!("centerwin stopped.");
        return;
    }

    if process::kill_process(pid) {
        let _ = pid::remove_pid_file();
        println!("centerwin stopped (killed PID {pid}).");
    } else {
        eprintln!("Failed to stop process {pid}.");
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::unsupported("stop");
}
