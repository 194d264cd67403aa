//! In-memory desktop, clock and sources for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

use crate::monitor::{MonitorQuery, MonitorRects};
use crate::source::{AppearanceSource, SourceEvent};
use crate::window::UNKNOWN_TITLE;
use crate::{Error, Rect, Result, Size, WindowHandle, WindowQuery};

struct FakeWindow {
    title: String,
    /// Sizes returned by successive queries; the last one repeats.
    sizes: VecDeque<Size>,
    visible: bool,
    /// `false` for menus, tooltips and tool windows.
    app_window: bool,
    maximized: bool,
    maximize_after_checks: Option<usize>,
    close_after_queries: Option<usize>,
    /// `Some(None)` simulates a failed monitor lookup.
    monitor: Option<Option<MonitorRects>>,
    alive: bool,
    reject_moves: bool,
    fail_title: bool,
    position: Option<(i32, i32)>,
    size_queries: usize,
    title_queries: usize,
    maximized_checks: usize,
}

struct Inner {
    windows: BTreeMap<WindowHandle, FakeWindow>,
    next_handle: usize,
    moves: Vec<(WindowHandle, i32, i32)>,
    monitor: MonitorRects,
    primary: Rect,
}

/// A scriptable desktop implementing both platform traits.
pub(crate) struct FakeDesktop {
    inner: RefCell<Inner>,
}

impl FakeDesktop {
    /// One 1920x1080 monitor with a 40px taskbar at the bottom.
    pub(crate) fn single_monitor() -> Self {
        Self {
            inner: RefCell::new(Inner {
                windows: BTreeMap::new(),
                next_handle: 0x10010,
                moves: Vec::new(),
                monitor: MonitorRects {
                    full: Rect::new(0, 0, 1920, 1080),
                    work: Rect::new(0, 0, 1920, 1040),
                },
                primary: Rect::new(0, 0, 1920, 1080),
            }),
        }
    }

    pub(crate) fn add_window(&self, title: &str, (width, height): (i32, i32)) -> WindowHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = WindowHandle(inner.next_handle);
        inner.next_handle += 0x10;
        inner.windows.insert(
            handle,
            FakeWindow {
                title: title.to_string(),
                sizes: VecDeque::from([Size::new(width, height)]),
                visible: true,
                app_window: true,
                maximized: false,
                maximize_after_checks: None,
                close_after_queries: None,
                monitor: None,
                alive: true,
                reject_moves: false,
                fail_title: false,
                position: None,
                size_queries: 0,
                title_queries: 0,
                maximized_checks: 0,
            },
        );
        handle
    }

    fn with<R>(&self, handle: WindowHandle, f: impl FnOnce(&mut FakeWindow) -> R) -> R {
        let mut inner = self.inner.borrow_mut();
        let window = inner
            .windows
            .get_mut(&handle)
            .expect("unknown fake window");
        f(window)
    }

    pub(crate) fn script_sizes(&self, handle: WindowHandle, sizes: Vec<Size>) {
        self.with(handle, |w| w.sizes = sizes.into());
    }

    pub(crate) fn set_visible(&self, handle: WindowHandle, visible: bool) {
        self.with(handle, |w| w.visible = visible);
    }

    /// Turns the window into a caption-less popup such as a menu.
    pub(crate) fn make_popup(&self, handle: WindowHandle) {
        self.with(handle, |w| w.app_window = false);
    }

    pub(crate) fn set_maximized(&self, handle: WindowHandle, maximized: bool) {
        self.with(handle, |w| w.maximized = maximized);
    }

    /// Reports "not maximized" for the first `checks` queries, then maximized.
    pub(crate) fn maximize_after_checks(&self, handle: WindowHandle, checks: usize) {
        self.with(handle, |w| w.maximize_after_checks = Some(checks));
    }

    /// Destroys the window once it has answered `queries` size queries.
    pub(crate) fn close_after_queries(&self, handle: WindowHandle, queries: usize) {
        self.with(handle, |w| w.close_after_queries = Some(queries));
    }

    pub(crate) fn set_monitor(&self, handle: WindowHandle, monitor: Option<MonitorRects>) {
        self.with(handle, |w| w.monitor = Some(monitor));
    }

    pub(crate) fn reject_moves(&self, handle: WindowHandle) {
        self.with(handle, |w| w.reject_moves = true);
    }

    pub(crate) fn fail_title(&self, handle: WindowHandle) {
        self.with(handle, |w| w.fail_title = true);
    }

    pub(crate) fn close(&self, handle: WindowHandle) {
        self.with(handle, |w| w.alive = false);
    }

    pub(crate) fn moves(&self) -> Vec<(WindowHandle, i32, i32)> {
        self.inner.borrow().moves.clone()
    }

    pub(crate) fn position(&self, handle: WindowHandle) -> Option<(i32, i32)> {
        self.with(handle, |w| w.position)
    }

    pub(crate) fn size_queries(&self, handle: WindowHandle) -> usize {
        self.with(handle, |w| w.size_queries)
    }

    pub(crate) fn title_queries(&self, handle: WindowHandle) -> usize {
        self.with(handle, |w| w.title_queries)
    }
}

impl WindowQuery for FakeDesktop {
    fn title(&self, handle: WindowHandle) -> String {
        self.with(handle, |w| {
            w.title_queries += 1;
            if w.fail_title || !w.alive {
                UNKNOWN_TITLE.to_string()
            } else {
                w.title.clone()
            }
        })
    }

    fn size(&self, handle: WindowHandle) -> Result<Size> {
        self.with(handle, |w| {
            if !w.alive {
                return Err(Error::WindowGone(handle));
            }
            w.size_queries += 1;
            if w.close_after_queries.is_some_and(|n| w.size_queries > n) {
                w.alive = false;
                return Err(Error::WindowGone(handle));
            }
            let size = if w.sizes.len() > 1 {
                w.sizes.pop_front()
            } else {
                w.sizes.front().copied()
            };
            Ok(size.unwrap_or_default())
        })
    }

    fn is_maximized(&self, handle: WindowHandle) -> bool {
        self.with(handle, |w| {
            if !w.alive {
                return false;
            }
            w.maximized_checks += 1;
            match w.maximize_after_checks {
                Some(n) => w.maximized_checks > n,
                None => w.maximized,
            }
        })
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        self.with(handle, |w| w.alive && w.visible)
    }

    fn is_app_window(&self, handle: WindowHandle) -> bool {
        self.with(handle, |w| w.alive && w.app_window)
    }

    fn move_to(&self, handle: WindowHandle, x: i32, y: i32) -> Result<()> {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let window = inner
            .windows
            .get_mut(&handle)
            .expect("unknown fake window");
        if !window.alive {
            return Err(Error::WindowGone(handle));
        }
        if window.reject_moves {
            return Err(Error::MoveFailed {
                handle,
                reason: "Access is denied.".into(),
            });
        }
        window.position = Some((x, y));
        inner.moves.push((handle, x, y));
        Ok(())
    }

    fn enumerate_top_level_windows(&self) -> Vec<WindowHandle> {
        self.inner
            .borrow()
            .windows
            .iter()
            .filter(|(_, w)| w.alive)
            .map(|(&h, _)| h)
            .collect()
    }
}

impl MonitorQuery for FakeDesktop {
    fn monitor_for(&self, handle: WindowHandle) -> Option<MonitorRects> {
        let default = self.inner.borrow().monitor;
        self.with(handle, |w| w.monitor.unwrap_or(Some(default)))
    }

    fn primary_bounds(&self) -> Rect {
        self.inner.borrow().primary
    }
}

/// A clock whose `sleep` advances time instantly.
pub(crate) struct FakeClock {
    start: Instant,
    offset: Cell<Duration>,
}

impl FakeClock {
    pub(crate) fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl crate::clock::Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start + self.offset.get()
    }

    fn sleep(&self, duration: Duration) {
        self.offset.set(self.offset.get() + duration);
    }
}

/// Replays a fixed list of events, then reports `Closed`.
pub(crate) struct ScriptedSource {
    events: VecDeque<SourceEvent>,
}

impl ScriptedSource {
    pub(crate) fn new(events: impl IntoIterator<Item = SourceEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl AppearanceSource for ScriptedSource {
    fn wait(&mut self, _timeout: Duration) -> SourceEvent {
        self.events.pop_front().unwrap_or(SourceEvent::Closed)
    }
}

/// Wraps a source so it closes after a fixed number of waits.
pub(crate) struct Limited<S> {
    inner: S,
    waits_left: usize,
}

impl<S: AppearanceSource> AppearanceSource for Limited<S> {
    fn wait(&mut self, timeout: Duration) -> SourceEvent {
        if self.waits_left == 0 {
            return SourceEvent::Closed;
        }
        self.waits_left -= 1;
        self.inner.wait(timeout)
    }
}

pub(crate) trait LimitExt: AppearanceSource + Sized {
    fn by_ref_limit(&mut self, waits: usize) -> Limited<&mut Self> {
        Limited {
            inner: self,
            waits_left: waits,
        }
    }
}

impl<S: AppearanceSource> LimitExt for S {}
