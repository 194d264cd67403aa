#[cfg(windows)]
pub fn execute(polling: bool) {
    use centerwin_windows::daemon::{self, DaemonOptions};

    let options = DaemonOptions {
        polling,
        console: true,
    };
    if let Err(e) = daemon::run(options) {
        eprintln!("Daemon error: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
pub fn execute(_polling: bool) {
    super::unsupported("daemon");
}
