#[cfg(windows)]
pub fn execute() {
    use centerwin_core::pid;
    use centerwin_windows::process;

    match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => {
            println!("centerwin is running (PID: {pid}).");
        }
        Ok(Some(_)) => {
            let _ = pid::remove_pid_file();
            println!("centerwin is not running (cleaned up stale PID file).");
        }
        Ok(None) => println!("centerwin is not running."),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::unsupported("status");
}
