#[cfg(windows)]
pub fn execute(polling: bool) {
    use std::os::windows::process::CommandExt;
    use std::process::{Command, Stdio};

    use centerwin_core::pid;
    use centerwin_windows::process;

    /// `CREATE_NO_WINDOW` (0x08000000) keeps the daemon off any console
    /// and stops it inheriting ours. `CREATE_NEW_PROCESS_GROUP` (0x200)
    /// keeps Ctrl+C in this terminal from reaching it.
    const DETACH_FLAGS: u32 = 0x08000000 | 0x00000200;

    if let Ok(Some(pid)) = pid::read_pid_file() {
        if process::is_process_alive(pid) {
            println!("centerwin is already running (PID: {pid}).");
            return;
        }
        let _ = pid::remove_pid_file();
    }

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: cannot locate the centerwin executable: {e}");
            std::process::exit(1);
        }
    };

    let mut command = Command::new(exe);
    command.arg("daemon");
    if polling {
        command.arg("--polling");
    }

    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(DETACH_FLAGS)
        .spawn();

    match child {
        Ok(mut child) => {
            let pid = child.id();
            // Acknowledge without blocking; the daemon outlives us.
            let _ = child.try_wait();
            println!("centerwin started (PID: {pid}).");
        }
        Err(e) => {
            eprintln!("Error: failed to start daemon: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(windows))]
pub fn execute(_polling: bool) {
    super::unsupported("start");
}
