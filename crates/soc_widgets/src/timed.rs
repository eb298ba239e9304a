use core::time::Duration;
use web_time::Instant;

/// A value that holds for a fixed duration after it was set.
///
/// All queries take an explicit `now` so callers (and tests) control the clock.
/// Setting a new value replaces the previous one and restarts the countdown.
#[derive(Debug, Clone)]
pub struct TimedFlag<T> {
    ttl: Duration,
    slot: Option<(T, Instant)>,
}

impl<T> TimedFlag<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    pub fn set(&mut self, value: T, now: Instant) {
        self.slot = Some((value, now));
    }

    /// The value if it has not expired at `now`.
    pub fn get(&self, now: Instant) -> Option<&T> {
        match &self.slot {
            Some((v, at)) if now.saturating_duration_since(*at) < self.ttl => Some(v),
            _ => None,
        }
    }

    pub fn is_set(&self, now: Instant) -> bool {
        self.get(now).is_some()
    }

    /// Time left before expiry, `None` once expired or never set.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let (_, at) = self.slot.as_ref()?;
        self.ttl.checked_sub(now.saturating_duration_since(*at)).filter(|d| !d.is_zero())
    }

    /// Drops an expired value and hands it back.
    pub fn take_expired(&mut self, now: Instant) -> Option<T> {
        let expired = matches!(
            &self.slot,
            Some((_, at)) if now.saturating_duration_since(*at) >= self.ttl
        );
        if expired {
            self.slot.take().map(|(v, _)| v)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_ttl() {
        let t0 = Instant::now();
        let mut f = TimedFlag::new(Duration::from_secs(2));
        f.set("demo", t0);

        assert_eq!(f.get(t0), Some(&"demo"));
        assert!(f.is_set(t0 + Duration::from_millis(1999)));
        assert!(!f.is_set(t0 + Duration::from_secs(2)));
        assert_eq!(f.remaining(t0 + Duration::from_millis(500)), Some(Duration::from_millis(1500)));
        assert_eq!(f.remaining(t0 + Duration::from_millis(2500)), None);
    }

    #[test]
    fn test_new_value_restarts_countdown() {
        let t0 = Instant::now();
        let mut f = TimedFlag::new(Duration::from_millis(100));
        f.set(1, t0);
        f.set(2, t0 + Duration::from_millis(80));

        assert_eq!(f.get(t0 + Duration::from_millis(150)), Some(&2));
        assert_eq!(f.take_expired(t0 + Duration::from_millis(150)), None);
        assert_eq!(f.take_expired(t0 + Duration::from_millis(180)), Some(2));
        assert!(!f.is_set(t0 + Duration::from_millis(180)));
    }
}
