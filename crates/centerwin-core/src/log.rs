//! `tracing` setup with an optional size-rotated log file.
//!
//! Logs are written to `~/.config/centerwin/logs/centerwin.log`. When
//! the file exceeds the configured max size, it is rotated to
//! `centerwin.log.1` (one backup kept).

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const LOG_FILE_NAME: &str = "centerwin.log";
const BACKUP_EXTENSION: &str = "log.1";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Filter directive: "debug", "info", "warn", "error", or any
    /// `RUST_LOG`-style expression.
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// `RUST_LOG` overrides the configured level. `console` adds a stderr
/// layer for foreground runs. Does nothing if a subscriber is already set.
pub fn init(config: &LogConfig, console: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file = if config.enabled {
        open_log_file(config)
    } else {
        None
    };

    let file_layer = file.map(|f| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(f))
    });
    let console_layer = console.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(io::stderr)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();
}

fn open_log_file(config: &LogConfig) -> Option<RotatingFile> {
    let dir = crate::config::config_dir()?.join("logs");
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("Warning: cannot create {}: {e}", dir.display());
        return None;
    }
    let max_bytes = config.max_file_mb * 1024 * 1024;
    match RotatingFile::open(dir.join(LOG_FILE_NAME), max_bytes) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: cannot open log file: {e}");
            None
        }
    }
}

/// An append-only file that moves itself to a `.1` backup once it grows
/// past `max_bytes`. A limit of zero disables rotation.
pub struct RotatingFile {
    file: File,
    path: PathBuf,
    max_bytes: u64,
    written: u64,
}

impl RotatingFile {
    pub fn open(path: PathBuf, max_bytes: u64) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            max_bytes,
            written,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        self.path.with_extension(BACKUP_EXTENSION)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let backup = self.backup_path();
        // rename fails on Windows when the target exists.
        let _ = fs::remove_file(&backup);
        fs::rename(&self.path, &backup)?;
        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.written += n as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            self.rotate()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_once_limit_is_reached() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let mut file = RotatingFile::open(path.clone(), 32).unwrap();

        // Act
        file.write_all(b"0123456789012345678901234567890123456789")
            .unwrap();
        file.write_all(b"after\n").unwrap();

        // Assert
        let backup = dir.path().join("centerwin.log.1");
        assert_eq!(fs::read(&backup).unwrap().len(), 40);
        assert_eq!(fs::read_to_string(&path).unwrap(), "after\n");
    }

    #[test]
    fn second_rotation_replaces_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let mut file = RotatingFile::open(path, 4).unwrap();

        file.write_all(b"first").unwrap();
        file.write_all(b"second").unwrap();

        let backup = dir.path().join("centerwin.log.1");
        assert_eq!(fs::read_to_string(backup).unwrap(), "second");
    }

    #[test]
    fn zero_limit_never_rotates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let mut file = RotatingFile::open(path.clone(), 0).unwrap();

        file.write_all(&[b'x'; 1024]).unwrap();

        assert!(!dir.path().join("centerwin.log.1").exists());
        assert_eq!(file.path(), path.as_path());
    }

    #[test]
    fn existing_size_counts_toward_limit() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        fs::write(&path, [b'y'; 30]).unwrap();
        let mut file = RotatingFile::open(path, 32).unwrap();

        // Act
        file.write_all(b"zz").unwrap();

        // Assert
        assert!(dir.path().join("centerwin.log.1").exists());
    }

    #[test]
    fn default_log_config_is_disabled_info() {
        let config = LogConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.max_file_mb, 10);
    }
}
