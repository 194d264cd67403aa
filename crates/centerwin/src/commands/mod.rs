pub mod daemon;
pub mod debug;
pub mod ignore;
pub mod mode;
pub mod start;
pub mod status;
pub mod stop;

use std::io::ErrorKind;
use std::process;

use centerwin_core::{Config, Error, config};

/// Loads the config for editing.
///
/// A missing file starts from defaults; a broken one aborts so the
/// user's file is never overwritten with defaults.
fn load_for_edit() -> Config {
    match config::try_load() {
        Ok(config) => config,
        Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => Config::default(),
        Err(e) => {
            eprintln!("Error: cannot read config: {e}");
            process::exit(1);
        }
    }
}

/// Writes the config back, exiting on failure.
fn save(config: &Config) -> std::path::PathBuf {
    match config::save(config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: cannot save config: {e}");
            process::exit(1);
        }
    }
}

/// Exits for commands that need a live Windows desktop.
#[cfg(not(windows))]
fn unsupported(command: &str) -> ! {
    eprintln!("centerwin {command} is only available on Windows.");
    process::exit(1);
}
