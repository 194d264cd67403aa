/// Prints every window show event until Ctrl+C.
#[cfg(windows)]
pub fn execute() {
    use std::sync::Arc;
    use std::time::Duration;

    use centerwin_core::{AppearanceSource, Settings, SourceEvent, WindowQuery};
    use centerwin_windows::{Desktop, WinEventSource, ctrl_c};

    let settings = Arc::new(Settings::default());
    if let Err(e) = ctrl_c::set_handler(Arc::clone(&settings)) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut source = match WinEventSource::start() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("Watching window show events (press Ctrl+C to stop)...\n");

    while !settings.should_quit() {
        match source.wait(Duration::from_millis(100)) {
            SourceEvent::Candidates(handles) => {
                for handle in handles {
                    let title = Desktop.title(handle);
                    let ignored = if settings.is_ignored(&title) { " [ignored]" } else { "" };
                    println!("shown {handle} \"{title}\"{ignored}");
                }
            }
            SourceEvent::Idle => {}
            SourceEvent::Closed => break,
        }
    }
}

#[cfg(not(windows))]
pub fn execute() {
    super::super::unsupported("debug events");
}
