mod loader;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::placement::SettleTiming;
use crate::settings::{DisplayMode, IgnoreTitles};

pub use loader::{config_dir, config_path, load, load_from, save, save_to, try_load, try_load_from};

/// Upper bound on the settle wait. The detector handles one window at a
/// time, so this is also the longest a burst of new windows can stall.
pub const MAX_SETTLE_TIMEOUT_MS: u64 = 1000;

/// Top-level configuration for centerwin.
///
/// Loaded from `~/.config/centerwin/config.toml`. Missing keys fall back
/// to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Center inside the work area (`true`) or the full monitor (`false`).
    pub respect_work_area: bool,
    /// Window titles to ignore in addition to the built-in list.
    pub extra_ignore_titles: Vec<String>,
    /// How new windows are detected.
    pub detection: DetectionConfig,
    /// Stabilization wait for freshly shown windows.
    pub placement: PlacementConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Detection strategy settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub mode: DetectionMode,
    /// Interval between enumerations in polling mode.
    pub poll_interval_ms: u64,
}

/// How the daemon learns that a window appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Subscribe to OS show events.
    #[default]
    Events,
    /// Periodically enumerate top-level windows.
    Polling,
}

/// Settle-wait settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Delay between size samples.
    pub settle_interval_ms: u64,
    /// Give up on a window that has no size after this long.
    pub settle_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            respect_work_area: true,
            extra_ignore_titles: Vec::new(),
            detection: DetectionConfig::default(),
            placement: PlacementConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            mode: DetectionMode::Events,
            poll_interval_ms: 50,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            settle_interval_ms: 20,
            settle_timeout_ms: 500,
        }
    }
}

impl Config {
    /// Clamps values to safe ranges and tidies the ignore list.
    ///
    /// Empty and duplicate extra titles are dropped; order is kept.
    pub fn validate(&mut self) {
        self.detection.poll_interval_ms = self.detection.poll_interval_ms.clamp(10, 1000);
        self.placement.settle_interval_ms = self.placement.settle_interval_ms.clamp(5, 200);
        self.placement.settle_timeout_ms = self.placement.settle_timeout_ms.min(MAX_SETTLE_TIMEOUT_MS);

        let mut seen = Vec::with_capacity(self.extra_ignore_titles.len());
        self.extra_ignore_titles.retain(|title| {
            if title.is_empty() || seen.contains(title) {
                return false;
            }
            seen.push(title.clone());
            true
        });
    }

    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_respect_work_area(self.respect_work_area)
    }

    /// Built-in ignore titles followed by the user's extras.
    pub fn ignore_titles(&self) -> IgnoreTitles {
        IgnoreTitles::with_extra(self.extra_ignore_titles.iter().cloned())
    }

    pub fn settle_timing(&self) -> SettleTiming {
        SettleTiming {
            interval: Duration::from_millis(self.placement.settle_interval_ms),
            timeout: Duration::from_millis(self.placement.settle_timeout_ms),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.detection.poll_interval_ms)
    }

    /// Adds an extra ignore title. Returns `false` if it was already listed
    /// (built-in titles included).
    pub fn add_ignore_title(&mut self, title: &str) -> bool {
        if title.is_empty() || self.ignore_titles().contains(title) {
            return false;
        }
        self.extra_ignore_titles.push(title.to_string());
        true
    }

    /// Removes an extra ignore title. Built-in titles can't be removed.
    pub fn remove_ignore_title(&mut self, title: &str) -> bool {
        let before = self.extra_ignore_titles.len();
        self.extra_ignore_titles.retain(|t| t != title);
        self.extra_ignore_titles.len() != before
    }
}
