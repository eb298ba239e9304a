use core::time::Duration;
use std::collections::VecDeque;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::local_now;
use crate::colors::StatusColor;
use crate::feed::{EventSource, Feed};
use crate::generator::LogSource;

pub const LOG_TICK: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_VISIBLE: usize = 20;
/// Entries generated when a panel starts without caller-provided logs.
pub const LOG_SEED_COUNT: usize = 20;
pub const LOG_SEED_SPACING: Duration = Duration::from_secs(3);
pub const EMPTY_LOGS_MESSAGE: &str = "No security logs yet. Waiting for threats...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Blocked,
    Critical,
    Warning,
    Info,
    Success,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Blocked,
        Severity::Critical,
        Severity::Warning,
        Severity::Info,
        Severity::Success,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Severity::Blocked => "BLOCKED",
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
            Severity::Success => "SUCCESS",
        }
    }

    /// What the (pretend) gateway did with the request.
    pub fn action(self) -> &'static str {
        match self {
            Severity::Blocked => "Blocked & Logged",
            _ => "Monitored",
        }
    }

    pub fn color(self) -> StatusColor {
        match self {
            Severity::Blocked => StatusColor::Critical,
            Severity::Critical => StatusColor::High,
            Severity::Warning => StatusColor::Normal,
            Severity::Info => StatusColor::Blue,
            Severity::Success => StatusColor::Safe,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Blocked => "⊗",
            Severity::Critical => "❗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
            Severity::Success => "✔",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub at: NaiveTime,
    pub kind: String,
    pub severity: Severity,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

/// Newest-first list capped at `max_visible`; the oldest entries fall off the end.
#[derive(Debug, Clone)]
pub struct LogFeed {
    entries: VecDeque<LogEntry>,
    max_visible: usize,
}

impl LogFeed {
    pub fn new(max_visible: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_visible + 1),
            max_visible,
        }
    }

    /// `entries` are taken newest first and truncated right away.
    pub fn from_entries(entries: impl IntoIterator<Item = LogEntry>, max_visible: usize) -> Self {
        let mut feed = Self::new(max_visible);
        feed.entries.extend(entries);
        feed.entries.truncate(max_visible);
        feed
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.max_visible);
    }

    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    pub fn set_max_visible(&mut self, max_visible: usize) {
        self.max_visible = max_visible;
        self.entries.truncate(max_visible);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn newest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Newest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &LogEntry> {
        self.entries.iter()
    }
}

/// State behind the real-time logs panel.
pub struct LogsPanel<S = LogSource>
where
    S: EventSource<Event = LogEntry>,
{
    logs: LogFeed,
    feed: Feed<S>,
    scroll_to_newest: bool,
}

impl<S> LogsPanel<S>
where
    S: EventSource<Event = LogEntry> + 'static,
{
    /// Seeds [`LOG_SEED_COUNT`] entries from `source`, spaced [`LOG_SEED_SPACING`] apart.
    pub fn new(mut source: S, max_visible: usize) -> Self {
        let mut seed = source.backfill(LOG_SEED_COUNT, LOG_SEED_SPACING, local_now());
        seed.reverse();
        Self::from_seed(source, seed, max_visible)
    }

    /// Like [`LogsPanel::new`] with the widget's own cap of [`DEFAULT_MAX_VISIBLE`].
    pub fn with_default_cap(source: S) -> Self {
        Self::new(source, DEFAULT_MAX_VISIBLE)
    }

    /// Uses caller-provided entries, newest first. New entries get ids past the seeded ones.
    pub fn from_seed(mut source: S, seed: Vec<LogEntry>, max_visible: usize) -> Self {
        source.continue_after(&seed);
        Self {
            logs: LogFeed::from_entries(seed, max_visible),
            feed: Feed::new("logs", source, LOG_TICK),
            scroll_to_newest: true,
        }
    }

    pub fn logs(&self) -> &LogFeed {
        &self.logs
    }

    pub fn feed(&self) -> &Feed<S> {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut Feed<S> {
        &mut self.feed
    }

    pub fn set_max_visible(&mut self, max_visible: usize) {
        if max_visible != self.logs.max_visible() {
            self.logs.set_max_visible(max_visible);
            self.scroll_to_newest = true;
        }
    }

    pub fn attach(&mut self) {
        self.feed.attach();
    }

    pub fn detach(&mut self) {
        self.feed.detach();
    }

    pub fn pump(&mut self) -> usize {
        let mut n = 0;
        for entry in self.feed.drain() {
            self.logs.push(entry);
            n += 1;
        }
        if n > 0 {
            self.scroll_to_newest = true;
        }
        n
    }

    /// One synchronous tick from the idle source. `false` while the feed is attached.
    pub fn advance(&mut self, at: NaiveTime) -> bool {
        match self.feed.generate_now(at) {
            Some(entry) => {
                self.logs.push(entry);
                self.scroll_to_newest = true;
                true
            }
            None => false,
        }
    }

    /// Whether the list changed since the view last scrolled; clears the flag.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_newest)
    }
}
