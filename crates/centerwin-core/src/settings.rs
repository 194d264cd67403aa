//! Runtime state shared between the detector and settings actions.
//!
//! The detector only reads the display mode and ignore titles; settings
//! actions (CLI, config reload, Ctrl+C) only write them. Each field has
//! its own lock or atomic so no operation ever holds two at once.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, RwLock};

/// Window titles that are never centered, regardless of user config.
///
/// These are shell surfaces (Start, search, flyouts) and tools that
/// manage their own placement.
pub const BUILTIN_IGNORE_TITLES: &[&str] = &[
    "Task Switching",
    "PopupHost",
    "Start",
    "Search",
    "Cortana",
    "Task Manager",
    "Notification Center",
    "Volume Mixer",
    "LockApp",
    "Windows Shell Experience Host",
    "On-Screen Keyboard",
    "System tray overflow window.",
];

/// Which monitor rectangle new windows are centered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Center inside the work area (excludes the taskbar).
    #[default]
    RespectWorkArea,
    /// Center inside the full monitor bounds.
    FullMonitor,
}

impl DisplayMode {
    /// Maps the persisted `respect_work_area` flag to a mode.
    pub fn from_respect_work_area(respect: bool) -> Self {
        if respect {
            Self::RespectWorkArea
        } else {
            Self::FullMonitor
        }
    }

    pub fn respects_work_area(self) -> bool {
        self == Self::RespectWorkArea
    }

    fn to_u8(self) -> u8 {
        match self {
            Self::RespectWorkArea => 0,
            Self::FullMonitor => 1,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::FullMonitor,
            _ => Self::RespectWorkArea,
        }
    }
}

/// Ordered set of exact window titles to leave alone.
///
/// Matching is exact and case-sensitive: "Task Manager" does not match
/// "Task Manager - Details".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreTitles {
    titles: Vec<String>,
}

impl IgnoreTitles {
    /// Builds the set from the built-in list followed by `extra`.
    ///
    /// Duplicates keep their first position.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self { titles: Vec::new() };
        for title in BUILTIN_IGNORE_TITLES {
            set.insert(*title);
        }
        for title in extra {
            set.insert(title);
        }
        set
    }

    /// Adds a title if it is not already present. Returns whether it was added.
    pub fn insert(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if self.contains(&title) {
            return false;
        }
        self.titles.push(title);
        true
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl Default for IgnoreTitles {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<String>())
    }
}

/// Process-wide settings owned by one monitoring session.
///
/// Cloned cheaply as an `Arc` and handed to the detector, the config
/// watcher, and the shutdown handler.
#[derive(Debug)]
pub struct Settings {
    mode: AtomicU8,
    ignore: RwLock<IgnoreTitles>,
    quit: AtomicBool,
}

impl Settings {
    pub fn new(mode: DisplayMode, ignore: IgnoreTitles) -> Arc<Self> {
        Arc::new(Self {
            mode: AtomicU8::new(mode.to_u8()),
            ignore: RwLock::new(ignore),
            quit: AtomicBool::new(false),
        })
    }

    /// The mode used for the next placement decision.
    pub fn mode(&self) -> DisplayMode {
        DisplayMode::from_u8(self.mode.load(Ordering::Acquire))
    }

    /// Switches the display mode. Already placed windows stay where they are.
    pub fn set_mode(&self, mode: DisplayMode) {
        let previous = DisplayMode::from_u8(self.mode.swap(mode.to_u8(), Ordering::AcqRel));
        if previous != mode {
            tracing::info!(?previous, ?mode, "display mode changed");
        }
    }

    /// Whether `title` matches an ignore entry exactly.
    pub fn is_ignored(&self, title: &str) -> bool {
        // A poisoned lock still holds a valid set; keep reading it.
        let ignore = self.ignore.read().unwrap_or_else(|e| e.into_inner());
        ignore.contains(title)
    }

    /// Replaces the user-added titles, keeping the built-in list.
    pub fn set_extra_ignore_titles(&self, extra: &[String]) {
        let rebuilt = IgnoreTitles::with_extra(extra.iter().cloned());
        let mut ignore = self.ignore.write().unwrap_or_else(|e| e.into_inner());
        if *ignore != rebuilt {
            tracing::info!(count = rebuilt.len(), "ignore list updated");
            *ignore = rebuilt;
        }
    }

    /// Returns a copy of the current ignore list.
    pub fn ignore_titles(&self) -> IgnoreTitles {
        self.ignore.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Signals every loop in the session to stop.
    pub fn quit(&self) {
        self.quit.store(true, Ordering::Release);
    }

    pub fn should_quit(&self) -> bool {
        self.quit.load(Ordering::Acquire)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: AtomicU8::new(DisplayMode::default().to_u8()),
            ignore: RwLock::new(IgnoreTitles::default()),
            quit: AtomicBool::new(false),
        }
    }
}
