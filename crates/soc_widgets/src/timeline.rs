use core::time::Duration;
use std::collections::VecDeque;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::clock::local_now;
use crate::feed::{EventSource, Feed};
use crate::generator::TimelineSource;

/// Slots in the rolling network timeline.
pub const TIMELINE_CAPACITY: usize = 30;
/// One new block per tick.
pub const TIMELINE_TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_BLOCKED_PROBABILITY: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficKind {
    Success,
    Blocked,
}

impl TrafficKind {
    pub fn description(self) -> &'static str {
        match self {
            TrafficKind::Success => "Normal Traffic",
            TrafficKind::Blocked => "Attack Blocked",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub at: NaiveTime,
    pub kind: TrafficKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficCounts {
    pub success: usize,
    pub blocked: usize,
}

/// Fixed-capacity sequence ordered oldest to newest.
///
/// Pushing into a full buffer evicts the oldest event, so once full the length never changes.
#[derive(Debug, Clone)]
pub struct RollingTimeline {
    events: VecDeque<TimelineEvent>,
    capacity: usize,
}

impl RollingTimeline {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Keeps the newest `capacity` of `events`.
    pub fn from_events(events: impl IntoIterator<Item = TimelineEvent>, capacity: usize) -> Self {
        let mut t = Self::new(capacity);
        for e in events {
            t.push(e);
        }
        t
    }

    /// Appends at the tail, returning the evicted head when full.
    pub fn push(&mut self, event: TimelineEvent) -> Option<TimelineEvent> {
        if self.capacity == 0 {
            return Some(event);
        }
        let evicted = if self.events.len() >= self.capacity {
            self.events.pop_front()
        } else {
            None
        };
        self.events.push_back(event);
        evicted
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.events.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TimelineEvent> {
        self.events.iter()
    }

    pub fn oldest(&self) -> Option<&TimelineEvent> {
        self.events.front()
    }

    pub fn newest(&self) -> Option<&TimelineEvent> {
        self.events.back()
    }

    pub fn counts(&self) -> TrafficCounts {
        let blocked = self
            .events
            .iter()
            .filter(|e| e.kind == TrafficKind::Blocked)
            .count();
        TrafficCounts {
            success: self.events.len() - blocked,
            blocked,
        }
    }
}

/// State behind the network activity panel: the rolling buffer plus the feed refilling it.
pub struct NetworkTimeline<S = TimelineSource>
where
    S: EventSource<Event = TimelineEvent>,
{
    buffer: RollingTimeline,
    feed: Feed<S>,
}

impl<S> NetworkTimeline<S>
where
    S: EventSource<Event = TimelineEvent> + 'static,
{
    /// Seeds a full buffer from `source`, ending at the current time.
    pub fn new(source: S) -> Self {
        Self::with_capacity(source, TIMELINE_CAPACITY)
    }

    pub fn with_capacity(mut source: S, capacity: usize) -> Self {
        let seed = source.backfill(capacity, TIMELINE_TICK, local_now());
        Self::from_seed(source, seed, capacity)
    }

    /// Uses caller-provided events instead of generating a backfill.
    pub fn from_seed(mut source: S, seed: Vec<TimelineEvent>, capacity: usize) -> Self {
        source.continue_after(&seed);
        Self {
            buffer: RollingTimeline::from_events(seed, capacity),
            feed: Feed::new("timeline", source, TIMELINE_TICK),
        }
    }

    pub fn buffer(&self) -> &RollingTimeline {
        &self.buffer
    }

    pub fn feed(&self) -> &Feed<S> {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut Feed<S> {
        &mut self.feed
    }

    pub fn attach(&mut self) {
        self.feed.attach();
    }

    pub fn detach(&mut self) {
        self.feed.detach();
    }

    /// Applies everything the feed delivered since the last call. Returns how many events landed.
    pub fn pump(&mut self) -> usize {
        let mut n = 0;
        for ev in self.feed.drain() {
            self.buffer.push(ev);
            n += 1;
        }
        n
    }

    /// One synchronous tick from the idle source. `false` while the feed is attached.
    pub fn advance(&mut self, at: NaiveTime) -> bool {
        match self.feed.generate_now(at) {
            Some(ev) => {
                self.buffer.push(ev);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ScriptedSource;
    use crate::generator::SyntheticGenerator;

    fn ev(sec: u32, kind: TrafficKind) -> TimelineEvent {
        TimelineEvent {
            at: NaiveTime::from_hms_opt(12, 0, sec).unwrap(),
            kind,
        }
    }

    #[test]
    fn test_push_evicts_oldest_when_full() {
        let mut t = RollingTimeline::new(3);
        assert_eq!(t.push(ev(0, TrafficKind::Success)), None);
        assert_eq!(t.push(ev(1, TrafficKind::Blocked)), None);
        assert_eq!(t.push(ev(2, TrafficKind::Success)), None);
        assert!(t.is_full());

        assert_eq!(t.push(ev(3, TrafficKind::Success)), Some(ev(0, TrafficKind::Success)));
        assert_eq!(t.len(), 3);
        assert_eq!(t.oldest(), Some(&ev(1, TrafficKind::Blocked)));
        assert_eq!(t.newest(), Some(&ev(3, TrafficKind::Success)));
    }

    #[test]
    fn test_from_events_keeps_newest() {
        let events: Vec<_> = (0..40).map(|s| ev(s, TrafficKind::Success)).collect();
        let t = RollingTimeline::from_events(events, TIMELINE_CAPACITY);
        assert_eq!(t.len(), TIMELINE_CAPACITY);
        assert_eq!(t.oldest(), Some(&ev(10, TrafficKind::Success)));
        assert_eq!(t.newest(), Some(&ev(39, TrafficKind::Success)));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut t = RollingTimeline::new(0);
        assert_eq!(t.push(ev(0, TrafficKind::Blocked)), Some(ev(0, TrafficKind::Blocked)));
        assert!(t.is_empty());
        assert_eq!(t.counts(), TrafficCounts::default());
    }

    #[test]
    fn test_counts_follow_contents() {
        let mut t = RollingTimeline::new(4);
        for (s, k) in [
            (0, TrafficKind::Blocked),
            (1, TrafficKind::Success),
            (2, TrafficKind::Success),
            (3, TrafficKind::Blocked),
        ] {
            t.push(ev(s, k));
        }
        assert_eq!(t.counts(), TrafficCounts { success: 2, blocked: 2 });

        t.push(ev(4, TrafficKind::Success));
        assert_eq!(t.counts(), TrafficCounts { success: 3, blocked: 1 });
    }

    #[test]
    fn test_default_seed_is_full_and_chronological() {
        let timeline = NetworkTimeline::new(TimelineSource::new(SyntheticGenerator::seeded(9)));
        let buf = timeline.buffer();
        assert_eq!(buf.len(), TIMELINE_CAPACITY);
        let stamps: Vec<_> = buf.iter().map(|e| e.at).collect();
        for pair in stamps.windows(2) {
            let gap = pair[1].signed_duration_since(pair[0]).num_seconds();
            // one second apart, or wrapped past midnight
            assert!(gap == 1 || gap < 0, "gap = {gap}");
        }
    }

    #[test]
    fn test_length_is_constant_across_ticks() {
        let source = ScriptedSource::new([
            ev(0, TrafficKind::Success),
            ev(0, TrafficKind::Blocked),
            ev(0, TrafficKind::Success),
        ]);
        let mut timeline = NetworkTimeline::new(source);
        for _ in 0..100 {
            assert_eq!(timeline.buffer().len(), TIMELINE_CAPACITY);
            assert!(timeline.advance(NaiveTime::MIN));
            assert_eq!(timeline.buffer().len(), TIMELINE_CAPACITY);
        }
    }

    #[test]
    fn test_pump_appends_in_delivery_order() {
        let seed = vec![ev(0, TrafficKind::Success), ev(1, TrafficKind::Success)];
        let mut timeline =
            NetworkTimeline::from_seed(ScriptedSource::new([ev(9, TrafficKind::Success)]), seed, 2);
        let tx = timeline.feed().injector();
        tx.send(ev(2, TrafficKind::Blocked)).unwrap();
        tx.send(ev(3, TrafficKind::Success)).unwrap();

        assert_eq!(timeline.pump(), 2);
        let got: Vec<_> = timeline.buffer().iter().cloned().collect();
        assert_eq!(got, vec![ev(2, TrafficKind::Blocked), ev(3, TrafficKind::Success)]);
    }
}
