//! Centers one freshly shown window.
//!
//! New windows often report a 0x0 size until their first layout pass,
//! so the engine polls the size for a bounded time before it computes
//! anything. Placement is best-effort: every failure ends in an
//! [`Outcome`] instead of an error, and no window is retried.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::monitor::{self, MonitorQuery};
use crate::{Settings, Size, WindowHandle, WindowQuery};

/// How long to wait for a new window to report a usable size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTiming {
    /// Delay between size samples.
    pub interval: Duration,
    /// Total time budget before giving up on the window.
    pub timeout: Duration,
}

impl Default for SettleTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(20),
            timeout: Duration::from_millis(500),
        }
    }
}

/// Why a window was left where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbandonReason {
    /// Maximized when it appeared.
    Maximized,
    /// Never reported a positive size within the settle timeout.
    NoStableSize,
    /// Closed while waiting for a size.
    WindowGone,
    /// Finished maximizing during the settle wait.
    MaximizedAfterSettle,
    /// The OS rejected the move.
    MoveFailed,
}

/// Terminal state of one processed window.
///
/// All variants mean the same thing to the detector (the handle is
/// known and will not be looked at again); they differ only for logs
/// and session statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Title matched the ignore list.
    Ignored,
    /// Moved to the given top-left position.
    Placed { x: i32, y: i32 },
    /// Not moved.
    Abandoned(AbandonReason),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignored => write!(f, "ignored"),
            Self::Placed { x, y } => write!(f, "placed at ({x}, {y})"),
            Self::Abandoned(reason) => write!(f, "abandoned ({reason:?})"),
        }
    }
}

/// Decides whether and where to move a window, then moves it.
pub struct PlacementEngine<W, M, C = SystemClock> {
    windows: W,
    monitors: M,
    clock: C,
    settings: Arc<Settings>,
    timing: SettleTiming,
}

impl<W: WindowQuery, M: MonitorQuery> PlacementEngine<W, M> {
    pub fn new(windows: W, monitors: M, settings: Arc<Settings>, timing: SettleTiming) -> Self {
        Self::with_clock(windows, monitors, SystemClock, settings, timing)
    }
}

impl<W: WindowQuery, M: MonitorQuery, C: Clock> PlacementEngine<W, M, C> {
    pub fn with_clock(
        windows: W,
        monitors: M,
        clock: C,
        settings: Arc<Settings>,
        timing: SettleTiming,
    ) -> Self {
        Self {
            windows,
            monitors,
            clock,
            settings,
            timing,
        }
    }

    /// The window adapter, shared with the detector for title lookups.
    pub fn windows(&self) -> &W {
        &self.windows
    }

    /// Centers `handle` on its monitor unless it is maximized or never
    /// settles. Blocks for at most the settle timeout.
    pub fn place_if_eligible(&self, handle: WindowHandle) -> Outcome {
        if self.windows.is_maximized(handle) {
            return Outcome::Abandoned(AbandonReason::Maximized);
        }

        let size = match self.wait_for_size(handle) {
            Ok(size) => size,
            Err(reason) => return Outcome::Abandoned(reason),
        };

        if self.windows.is_maximized(handle) {
            return Outcome::Abandoned(AbandonReason::MaximizedAfterSettle);
        }

        // Read the mode now, not when the window appeared: a toggle during
        // the settle wait applies to this window.
        let mode = self.settings.mode();
        let area = monitor::usable_area(&self.monitors, handle, mode);
        let (x, y) = area.center_of(size);

        match self.windows.move_to(handle, x, y) {
            Ok(()) => {
                tracing::debug!(%handle, ?mode, ?area, w = size.width, h = size.height, x, y, "moved");
                Outcome::Placed { x, y }
            }
            Err(e) => {
                tracing::warn!(%handle, "{e}");
                Outcome::Abandoned(AbandonReason::MoveFailed)
            }
        }
    }

    /// Samples the window size until both dimensions are positive or the
    /// timeout elapses. The first sample is taken immediately.
    fn wait_for_size(&self, handle: WindowHandle) -> Result<Size, AbandonReason> {
        let deadline = self.clock.now() + self.timing.timeout;

        loop {
            match self.windows.size(handle) {
                Ok(size) if size.is_settled() => return Ok(size),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(%handle, "{e}");
                    return Err(AbandonReason::WindowGone);
                }
            }

            let now = self.clock.now();
            if now >= deadline {
                return Err(AbandonReason::NoStableSize);
            }
            self.clock.sleep(self.timing.interval.min(deadline - now));
        }
    }
}
