//! Turns raw "window shown" candidates into exactly-once placements.
//!
//! Every handle moves through `Unseen -> Known` once. The transition
//! happens right after the single processing attempt, whatever its
//! outcome, so duplicate show events and repeated polls are discarded.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::monitor::MonitorQuery;
use crate::placement::{AbandonReason, Outcome, PlacementEngine};
use crate::source::{AppearanceSource, SourceEvent};
use crate::{Settings, WindowHandle, WindowQuery};

/// Handles the detector has already dealt with.
///
/// Entries are never removed during a session. A stale handle from a
/// closed window is harmless; it just never shows up as fresh again.
#[derive(Debug, Default)]
pub struct KnownHandles {
    handles: HashSet<WindowHandle>,
}

impl KnownHandles {
    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.handles.contains(&handle)
    }

    /// Records a handle. Returns `false` if it was already known.
    pub fn mark(&mut self, handle: WindowHandle) -> bool {
        self.handles.insert(handle)
    }
}

/// Per-session counters, logged when monitoring stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub baseline: usize,
    pub placed: usize,
    pub ignored: usize,
    pub abandoned: usize,
    pub move_failures: usize,
    pub duplicates: usize,
}

impl SessionStats {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Placed { .. } => self.placed += 1,
            Outcome::Ignored => self.ignored += 1,
            Outcome::Abandoned(AbandonReason::MoveFailed) => {
                self.abandoned += 1;
                self.move_failures += 1;
            }
            Outcome::Abandoned(_) => self.abandoned += 1,
        }
    }
}

/// Default upper bound on one source wait, i.e. quit-signal latency.
pub const DEFAULT_WAIT_GRANULARITY: Duration = Duration::from_millis(100);

/// De-duplicates and filters candidates, then hands each new window to
/// the placement engine once.
pub struct Detector<W, M, C = SystemClock> {
    engine: PlacementEngine<W, M, C>,
    settings: Arc<Settings>,
    known: KnownHandles,
    stats: SessionStats,
}

impl<W: WindowQuery, M: MonitorQuery, C: Clock> Detector<W, M, C> {
    pub fn new(engine: PlacementEngine<W, M, C>, settings: Arc<Settings>) -> Self {
        Self {
            engine,
            settings,
            known: KnownHandles::default(),
            stats: SessionStats::default(),
        }
    }

    /// Marks every window that exists right now as known, so only
    /// windows appearing afterwards are candidates.
    ///
    /// Call before subscribing to show events or starting to poll.
    pub fn take_baseline(&mut self) -> usize {
        let existing = self.engine.windows().enumerate_top_level_windows();
        let added = existing
            .into_iter()
            .filter(|&hwnd| self.known.mark(hwnd))
            .count();
        self.stats.baseline += added;
        tracing::info!(windows = added, "baseline captured");
        added
    }

    /// Processes one candidate.
    ///
    /// Returns `None` if the handle was already known, otherwise the
    /// outcome of its single processing attempt.
    pub fn process(&mut self, handle: WindowHandle) -> Option<Outcome> {
        if self.known.contains(handle) {
            self.stats.duplicates += 1;
            return None;
        }

        // Untitled windows are transient surfaces (menus, dropdowns,
        // splash layers) and are left alone like ignored titles.
        let title = self.engine.windows().title(handle);
        let outcome = if title.is_empty() || self.settings.is_ignored(&title) {
            Outcome::Ignored
        } else {
            self.engine.place_if_eligible(handle)
        };

        self.known.mark(handle);
        self.stats.record(outcome);

        match outcome {
            Outcome::Placed { .. } => tracing::info!(%handle, %title, "{outcome}"),
            _ => tracing::debug!(%handle, %title, "{outcome}"),
        }

        Some(outcome)
    }

    /// Consumes the source until the quit signal is set or the source
    /// closes. Per-window failures never end the loop.
    pub fn run(&mut self, source: &mut impl AppearanceSource, granularity: Duration) {
        while !self.settings.should_quit() {
            match source.wait(granularity) {
                SourceEvent::Candidates(handles) => {
                    for handle in handles {
                        if self.settings.should_quit() {
                            break;
                        }
                        self.process(handle);
                    }
                }
                SourceEvent::Idle => {}
                SourceEvent::Closed => {
                    tracing::info!("appearance source closed");
                    break;
                }
            }
        }

        let stats = self.stats;
        tracing::info!(
            placed = stats.placed,
            ignored = stats.ignored,
            abandoned = stats.abandoned,
            move_failures = stats.move_failures,
            duplicates = stats.duplicates,
            "monitoring stopped"
        );
    }

    pub fn known(&self) -> &KnownHandles {
        &self.known
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::SettleTiming;
    use crate::source::PollingSource;
    use crate::testing::{FakeClock, FakeDesktop, LimitExt, ScriptedSource};
    use crate::{DisplayMode, IgnoreTitles, Size};

    type TestDetector<'a> = Detector<&'a FakeDesktop, &'a FakeDesktop, &'a FakeClock>;

    fn detector<'a>(
        desktop: &'a FakeDesktop,
        clock: &'a FakeClock,
        settings: &Arc<Settings>,
    ) -> TestDetector<'a> {
        let engine = PlacementEngine::with_clock(
            desktop,
            desktop,
            clock,
            Arc::clone(settings),
            SettleTiming::default(),
        );
        Detector::new(engine, Arc::clone(settings))
    }

    fn default_settings() -> Arc<Settings> {
        Settings::new(DisplayMode::RespectWorkArea, IgnoreTitles::default())
    }

    #[test]
    fn new_window_is_centered() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        detector.take_baseline();
        let hwnd = desktop.add_window("Notepad", (800, 600));
        let mut source = ScriptedSource::new([SourceEvent::Candidates(vec![hwnd])]);

        // Act
        detector.run(&mut source, DEFAULT_WAIT_GRANULARITY);

        // Assert
        assert_eq!(desktop.position(hwnd), Some((560, 220)));
        assert!(detector.known().contains(hwnd));
        assert_eq!(detector.stats().placed, 1);
    }

    #[test]
    fn baseline_windows_are_never_moved() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let existing = desktop.add_window("Explorer", (1000, 700));
        let hidden = desktop.add_window("Tray Helper", (200, 100));
        desktop.set_visible(hidden, false);
        let mut detector = detector(&desktop, &clock, &settings);

        // Act
        let baseline = detector.take_baseline();
        let mut source = ScriptedSource::new([
            SourceEvent::Candidates(vec![existing]),
            SourceEvent::Candidates(vec![hidden]),
        ]);
        detector.run(&mut source, DEFAULT_WAIT_GRANULARITY);

        // Assert
        assert_eq!(baseline, 2);
        assert!(desktop.moves().is_empty());
        assert_eq!(desktop.title_queries(existing), 0);
        assert_eq!(detector.stats().duplicates, 2);
    }

    #[test]
    fn duplicate_show_events_are_processed_once() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        detector.take_baseline();
        let hwnd = desktop.add_window("Paint", (800, 600));
        let mut source = ScriptedSource::new([
            SourceEvent::Candidates(vec![hwnd, hwnd]),
            SourceEvent::Idle,
            SourceEvent::Candidates(vec![hwnd]),
        ]);

        // Act
        detector.run(&mut source, DEFAULT_WAIT_GRANULARITY);

        // Assert
        assert_eq!(desktop.moves().len(), 1);
        assert_eq!(desktop.title_queries(hwnd), 1);
        assert_eq!(detector.stats().duplicates, 2);
    }

    #[test]
    fn ignored_title_is_marked_known_after_one_lookup() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        let hwnd = desktop.add_window("Task Manager", (900, 700));

        // Act
        let first = detector.process(hwnd);
        let second = detector.process(hwnd);

        // Assert
        assert_eq!(first, Some(Outcome::Ignored));
        assert_eq!(second, None);
        assert!(detector.known().contains(hwnd));
        assert_eq!(desktop.title_queries(hwnd), 1);
        assert_eq!(desktop.size_queries(hwnd), 0);
        assert!(desktop.moves().is_empty());
    }

    #[test]
    fn user_added_ignore_title_applies_to_later_windows() {
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        settings.set_extra_ignore_titles(&["Picture-in-Picture".to_string()]);
        let hwnd = desktop.add_window("Picture-in-Picture", (480, 270));

        assert_eq!(detector.process(hwnd), Some(Outcome::Ignored));
        assert!(desktop.moves().is_empty());
    }

    #[test]
    fn unknown_title_is_still_placed() {
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        let hwnd = desktop.add_window("", (800, 600));
        desktop.fail_title(hwnd);

        let outcome = detector.process(hwnd);

        assert_eq!(outcome, Some(Outcome::Placed { x: 560, y: 220 }));
    }

    #[test]
    fn untitled_window_is_known_but_not_moved() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        detector.take_baseline();
        let menu = desktop.add_window("", (200, 300));

        // Act
        let first = detector.process(menu);
        let second = detector.process(menu);

        // Assert
        assert_eq!(first, Some(Outcome::Ignored));
        assert_eq!(second, None);
        assert!(detector.known().contains(menu));
        assert_eq!(desktop.size_queries(menu), 0);
        assert!(desktop.moves().is_empty());
    }

    #[test]
    fn maximized_window_is_known_but_not_moved() {
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        let hwnd = desktop.add_window("Browser", (1920, 1040));
        desktop.set_maximized(hwnd, true);

        let outcome = detector.process(hwnd);

        assert_eq!(outcome, Some(Outcome::Abandoned(AbandonReason::Maximized)));
        assert!(detector.known().contains(hwnd));
        assert!(desktop.moves().is_empty());
    }

    #[test]
    fn abandoned_window_is_not_retried() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        let hwnd = desktop.add_window("Splash", (0, 0));

        // Act
        let first = detector.process(hwnd);
        desktop.script_sizes(hwnd, vec![Size::new(400, 300)]);
        let second = detector.process(hwnd);

        // Assert
        assert_eq!(first, Some(Outcome::Abandoned(AbandonReason::NoStableSize)));
        assert_eq!(second, None);
        assert!(desktop.moves().is_empty());
    }

    #[test]
    fn failed_move_does_not_stop_the_loop() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        let elevated = desktop.add_window("Admin Console", (800, 600));
        desktop.reject_moves(elevated);
        let normal = desktop.add_window("Notepad", (800, 600));
        let mut source = ScriptedSource::new([
            SourceEvent::Candidates(vec![elevated]),
            SourceEvent::Candidates(vec![normal, elevated]),
        ]);

        // Act
        detector.run(&mut source, DEFAULT_WAIT_GRANULARITY);

        // Assert
        assert_eq!(desktop.moves(), vec![(normal, 560, 220)]);
        let stats = detector.stats();
        assert_eq!(stats.move_failures, 1);
        assert_eq!(stats.placed, 1);
        assert_eq!(stats.duplicates, 1);
    }

    #[test]
    fn mode_toggle_only_affects_later_windows() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        let before = desktop.add_window("Before", (800, 600));
        let after = desktop.add_window("After", (800, 600));

        // Act
        detector.process(before);
        settings.set_mode(DisplayMode::FullMonitor);
        detector.process(after);
        detector.process(before);

        // Assert
        assert_eq!(desktop.position(before), Some((560, 220)));
        assert_eq!(desktop.position(after), Some((560, 240)));
        assert_eq!(desktop.moves().len(), 2);
    }

    #[test]
    fn quit_before_run_returns_without_waiting() {
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        let hwnd = desktop.add_window("Late", (800, 600));
        let mut source = ScriptedSource::new([SourceEvent::Candidates(vec![hwnd])]);
        settings.quit();

        detector.run(&mut source, DEFAULT_WAIT_GRANULARITY);

        assert_eq!(source.remaining(), 1);
        assert!(desktop.moves().is_empty());
    }

    #[test]
    fn quit_signal_stops_an_idle_loop() {
        struct QuitAfter {
            settings: Arc<Settings>,
            waits: usize,
        }

        impl AppearanceSource for QuitAfter {
            fn wait(&mut self, _timeout: Duration) -> SourceEvent {
                self.waits += 1;
                if self.waits == 3 {
                    self.settings.quit();
                }
                SourceEvent::Idle
            }
        }

        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let mut detector = detector(&desktop, &clock, &settings);
        let mut source = QuitAfter {
            settings: Arc::clone(&settings),
            waits: 0,
        };

        // Act
        detector.run(&mut source, DEFAULT_WAIT_GRANULARITY);

        // Assert
        assert_eq!(source.waits, 3);
    }

    #[test]
    fn polling_fallback_places_windows_opened_after_start() {
        // Arrange
        let desktop = FakeDesktop::single_monitor();
        let clock = FakeClock::new();
        let settings = default_settings();
        let existing = desktop.add_window("Explorer", (1000, 700));
        let mut detector = detector(&desktop, &clock, &settings);
        detector.take_baseline();
        let mut source = PollingSource::with_clock(&desktop, &clock, Duration::from_millis(50));

        // Act
        detector.run(&mut source.by_ref_limit(2), DEFAULT_WAIT_GRANULARITY);
        let fresh = desktop.add_window("Calculator", (320, 500));
        detector.run(&mut source.by_ref_limit(3), DEFAULT_WAIT_GRANULARITY);

        // Assert
        assert_eq!(desktop.moves(), vec![(fresh, 800, 270)]);
        assert_eq!(desktop.position(existing), None);
        // Only the first tick re-reports the baseline window.
        assert_eq!(detector.stats().duplicates, 1);
    }
}
