use std::sync::Arc;
use std::thread;

use centerwin_core::config::{self, Config, DetectionMode};
use centerwin_core::detector::DEFAULT_WAIT_GRANULARITY;
use centerwin_core::{Detector, PlacementEngine, PollingSource, Result, Settings, log, pid};

use crate::desktop::Desktop;
use crate::event_loop::WinEventSource;
use crate::{config_watcher, ctrl_c, dpi, stop_signal};

/// How the daemon was launched.
#[derive(Debug, Default, Clone, Copy)]
pub struct DaemonOptions {
    /// Force the polling source regardless of the config file.
    pub polling: bool,
    /// Also log to stderr.
    pub console: bool,
}

/// Runs the centerwin daemon until Ctrl+C or `centerwin stop`.
///
/// The main thread runs the detector. Background threads listen for
/// the stop event and for config edits.
pub fn run(options: DaemonOptions) -> Result<()> {
    dpi::enable_dpi_awareness();

    let config = config::load();
    log::init(&config.logging, options.console);

    pid::write_pid_file()?;
    tracing::info!(pid = std::process::id(), "daemon started");

    let result = monitor(&config, options);
    if let Err(e) = &result {
        tracing::error!("daemon failed: {e}");
    }

    if let Err(e) = pid::remove_pid_file() {
        tracing::warn!("cannot remove PID file: {e}");
    }
    tracing::info!("daemon stopped");

    result
}

/// The inner loop, separated so PID cleanup always runs in `run()`.
fn monitor(config: &Config, options: DaemonOptions) -> Result<()> {
    let settings = Settings::new(config.display_mode(), config.ignore_titles());
    tracing::info!(
        mode = ?settings.mode(),
        ignore_titles = settings.ignore_titles().len(),
        "settings loaded"
    );

    ctrl_c::set_handler(Arc::clone(&settings))?;
    let stop_listener = stop_signal::listen(Arc::clone(&settings))?;
    let watcher = {
        let settings = Arc::clone(&settings);
        thread::Builder::new()
            .name("config-watcher".into())
            .spawn(move || config_watcher::watch(settings))?
    };

    let engine = PlacementEngine::new(Desktop, Desktop, Arc::clone(&settings), config.settle_timing());
    let mut detector = Detector::new(engine, Arc::clone(&settings));

    // Everything already on screen is left alone.
    detector.take_baseline();

    let polling = options.polling || config.detection.mode == DetectionMode::Polling;
    let result = if polling {
        tracing::info!(interval = ?config.poll_interval(), "detecting new windows by polling");
        let mut source = PollingSource::new(Desktop, config.poll_interval());
        detector.run(&mut source, DEFAULT_WAIT_GRANULARITY);
        Ok(())
    } else {
        WinEventSource::start().map(|mut source| {
            tracing::info!("detecting new windows from show events");
            detector.run(&mut source, DEFAULT_WAIT_GRANULARITY);
        })
    };

    settings.quit();
    let _ = stop_listener.join();
    let _ = watcher.join();

    result
}
