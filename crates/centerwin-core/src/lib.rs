//! Platform-agnostic core of centerwin: detects newly shown top-level
//! windows and centers them on their monitor.
//!
//! Platform crates implement [`WindowQuery`], [`MonitorQuery`] and an
//! event-driven [`AppearanceSource`]; everything else lives here.

pub mod clock;
pub mod config;
pub mod detector;
pub mod error;
pub mod log;
pub mod monitor;
pub mod pid;
pub mod placement;
pub mod rect;
pub mod settings;
pub mod source;
pub mod window;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use detector::{Detector, KnownHandles, SessionStats};
pub use error::{Error, Result};
pub use monitor::{MonitorQuery, MonitorRects};
pub use placement::{AbandonReason, Outcome, PlacementEngine, SettleTiming};
pub use rect::{Rect, Size};
pub use settings::{DisplayMode, IgnoreTitles, Settings};
pub use source::{AppearanceSource, PollingSource, SourceEvent};
pub use window::{WindowHandle, WindowQuery};
