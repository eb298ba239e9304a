use core::time::Duration;

use chrono::NaiveTime;

use crate::clock::rewind;

/// Produces the next synthetic event for a feed.
///
/// Implementations must be total: generating an event can not fail.
pub trait EventSource: Send {
    type Event: Send + 'static;

    /// Next event, stamped with `at`.
    fn next_event(&mut self, at: NaiveTime) -> Self::Event;

    /// `count` events spaced `spacing` apart and ending at `newest`, oldest first.
    fn backfill(&mut self, count: usize, spacing: Duration, newest: NaiveTime) -> Vec<Self::Event> {
        (0..count)
            .rev()
            .map(|i| {
                let back = spacing.saturating_mul(u32::try_from(i).unwrap_or(u32::MAX));
                self.next_event(rewind(newest, back))
            })
            .collect()
    }

    /// Called once with the events a widget starts out with, so the source can continue after
    /// them (for example past their ids).
    fn continue_after(&mut self, _seeded: &[Self::Event]) {}
}

impl<E: Send + 'static> EventSource for Box<dyn EventSource<Event = E>> {
    type Event = E;

    fn next_event(&mut self, at: NaiveTime) -> E {
        self.as_mut().next_event(at)
    }

    fn continue_after(&mut self, seeded: &[E]) {
        self.as_mut().continue_after(seeded);
    }
}

/// Replays a fixed sequence of events, cycling once exhausted.
///
/// Timestamps passed to [`EventSource::next_event`] are ignored; events come out exactly as
/// scripted. Used to drive widgets deterministically.
#[derive(Debug, Clone)]
pub struct ScriptedSource<T> {
    script: Vec<T>,
    cursor: usize,
}

impl<T: Clone + Send + 'static> ScriptedSource<T> {
    /// # Panics
    /// If `script` is empty.
    pub fn new(script: impl IntoIterator<Item = T>) -> Self {
        let script: Vec<T> = script.into_iter().collect();
        assert!(!script.is_empty(), "scripted source needs at least one event");
        Self { script, cursor: 0 }
    }

    /// Number of events handed out so far.
    pub fn emitted(&self) -> usize {
        self.cursor
    }
}

impl<T: Clone + Send + 'static> EventSource for ScriptedSource<T> {
    type Event = T;

    fn next_event(&mut self, _at: NaiveTime) -> T {
        let ev = self.script[self.cursor % self.script.len()].clone();
        self.cursor += 1;
        ev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stamp;

    impl EventSource for Stamp {
        type Event = NaiveTime;
        fn next_event(&mut self, at: NaiveTime) -> NaiveTime {
            at
        }
    }

    #[test]
    fn test_backfill_is_oldest_first_and_evenly_spaced() {
        let newest = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let got = Stamp.backfill(3, Duration::from_secs(3), newest);
        assert_eq!(
            got,
            vec![
                NaiveTime::from_hms_opt(9, 59, 54).unwrap(),
                NaiveTime::from_hms_opt(9, 59, 57).unwrap(),
                newest,
            ]
        );
    }

    #[test]
    fn test_scripted_source_cycles() {
        let at = NaiveTime::MIN;
        let mut s = ScriptedSource::new(["a", "b"]);
        let got: Vec<_> = (0..5).map(|_| s.next_event(at)).collect();
        assert_eq!(got, vec!["a", "b", "a", "b", "a"]);
        assert_eq!(s.emitted(), 5);
    }

    #[test]
    fn test_boxed_source_delegates() {
        let mut boxed: Box<dyn EventSource<Event = &'static str>> =
            Box::new(ScriptedSource::new(["x"]));
        assert_eq!(boxed.next_event(NaiveTime::MIN), "x");
    }
}
