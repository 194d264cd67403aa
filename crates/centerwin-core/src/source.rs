//! Where "a window just appeared" notifications come from.
//!
//! Two implementations exist: the platform's show-event hook (preferred,
//! lives in the platform crate) and [`PollingSource`], which diffs
//! periodic enumerations. Both may report the same handle more than
//! once; the detector de-duplicates.

use std::collections::HashSet;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::{WindowHandle, WindowQuery};

/// Result of one wait on an appearance source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// Handles that may have just appeared, in arrival order.
    Candidates(Vec<WindowHandle>),
    /// Nothing arrived before the timeout.
    Idle,
    /// The source has shut down and will never produce again.
    Closed,
}

/// A stream of possibly-new window handles.
pub trait AppearanceSource {
    /// Blocks for at most `timeout` waiting for candidates.
    ///
    /// The bound lets the detector check the quit signal between waits.
    fn wait(&mut self, timeout: Duration) -> SourceEvent;
}

impl<T: AppearanceSource + ?Sized> AppearanceSource for &mut T {
    fn wait(&mut self, timeout: Duration) -> SourceEvent {
        (**self).wait(timeout)
    }
}

impl<T: AppearanceSource + ?Sized> AppearanceSource for Box<T> {
    fn wait(&mut self, timeout: Duration) -> SourceEvent {
        (**self).wait(timeout)
    }
}

/// Fallback source: enumerates top-level windows on a fixed interval.
///
/// Each tick reports the visible application windows that were not
/// visible on the previous tick, so a window that stays open is
/// reported once and one that is hidden and shown again is reported
/// again. A window that opens and closes between two ticks is never seen.
pub struct PollingSource<W, C = SystemClock> {
    windows: W,
    clock: C,
    interval: Duration,
    /// Visible application windows as of the last tick.
    seen: HashSet<WindowHandle>,
}

impl<W: WindowQuery> PollingSource<W> {
    pub fn new(windows: W, interval: Duration) -> Self {
        Self::with_clock(windows, SystemClock, interval)
    }
}

impl<W: WindowQuery, C: Clock> PollingSource<W, C> {
    pub fn with_clock(windows: W, clock: C, interval: Duration) -> Self {
        Self {
            windows,
            clock,
            interval,
            seen: HashSet::new(),
        }
    }
}

impl<W: WindowQuery, C: Clock> AppearanceSource for PollingSource<W, C> {
    fn wait(&mut self, timeout: Duration) -> SourceEvent {
        self.clock.sleep(self.interval.min(timeout));

        let visible: Vec<WindowHandle> = self
            .windows
            .enumerate_top_level_windows()
            .into_iter()
            .filter(|&hwnd| self.windows.is_visible(hwnd) && self.windows.is_app_window(hwnd))
            .collect();

        let fresh: Vec<WindowHandle> = visible
            .iter()
            .copied()
            .filter(|hwnd| !self.seen.contains(hwnd))
            .collect();
        self.seen = visible.into_iter().collect();

        if fresh.is_empty() {
            SourceEvent::Idle
        } else {
            SourceEvent::Candidates(fresh)
        }
    }
}
