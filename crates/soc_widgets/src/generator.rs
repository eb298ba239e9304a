use chrono::NaiveTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::feed::EventSource;
use crate::logs::{LogEntry, Severity};
use crate::timeline::{TimelineEvent, TrafficKind, DEFAULT_BLOCKED_PROBABILITY};

/// Random draws shared by every synthetic feed.
///
/// Each feed owns its own generator; forking from one seeded root keeps a whole dashboard
/// reproducible.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Independent child generator derived from this one.
    pub fn fork(&mut self) -> Self {
        Self {
            rng: StdRng::from_rng(&mut self.rng),
        }
    }

    /// `true` with probability `p` (clamped to `0..=1`).
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random::<f64>() < p.clamp(0.0, 1.0)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.rng.random_range(0..items.len()))
    }

    /// Address octet in `0..255`.
    pub fn octet(&mut self) -> u8 {
        self.rng.random_range(0..255)
    }
}

/// Success/blocked traffic blocks for the network timeline.
#[derive(Debug, Clone)]
pub struct TimelineSource {
    gen: SyntheticGenerator,
    blocked_probability: f64,
}

impl TimelineSource {
    pub fn new(gen: SyntheticGenerator) -> Self {
        Self {
            gen,
            blocked_probability: DEFAULT_BLOCKED_PROBABILITY,
        }
    }

    pub fn with_blocked_probability(mut self, p: f64) -> Self {
        self.blocked_probability = p;
        self
    }
}

impl EventSource for TimelineSource {
    type Event = TimelineEvent;

    fn next_event(&mut self, at: NaiveTime) -> TimelineEvent {
        let kind = if self.gen.chance(self.blocked_probability) {
            TrafficKind::Blocked
        } else {
            TrafficKind::Success
        };
        TimelineEvent { at, kind }
    }
}

/// Labels and severities a [`LogSource`] draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogCatalog {
    pub kinds: Vec<String>,
    pub severities: Vec<Severity>,
}

impl Default for LogCatalog {
    fn default() -> Self {
        Self {
            kinds: [
                "SQL Injection Attempt",
                "XSS Attack Detected",
                "DDoS Wave Incoming",
                "Credential Stuffing",
                "Malware Signature Match",
                "Suspicious Login",
                "Rate Limit Exceeded",
                "Invalid SSL Certificate",
                "Bot Traffic Detected",
                "Brute Force Attempt",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            severities: Severity::ALL.to_vec(),
        }
    }
}

/// Security log lines for the logs panel.
#[derive(Debug, Clone)]
pub struct LogSource {
    gen: SyntheticGenerator,
    catalog: LogCatalog,
    next_id: u64,
}

impl LogSource {
    const FALLBACK_KIND: &'static str = "Unclassified Event";

    pub fn new(gen: SyntheticGenerator) -> Self {
        Self::with_catalog(gen, LogCatalog::default())
    }

    pub fn with_catalog(gen: SyntheticGenerator, catalog: LogCatalog) -> Self {
        Self {
            gen,
            catalog,
            next_id: 0,
        }
    }

    /// Ids handed out from now on start at `id`.
    pub fn continue_ids_from(&mut self, id: u64) {
        self.next_id = self.next_id.max(id);
    }

    pub fn catalog(&self) -> &LogCatalog {
        &self.catalog
    }
}

impl EventSource for LogSource {
    type Event = LogEntry;

    fn next_event(&mut self, at: NaiveTime) -> LogEntry {
        let kind = self
            .gen
            .pick(&self.catalog.kinds)
            .cloned()
            .unwrap_or_else(|| Self::FALLBACK_KIND.to_string());
        let severity = self
            .gen
            .pick(&self.catalog.severities)
            .copied()
            .unwrap_or(Severity::Info);
        let (a, b) = (self.gen.octet(), self.gen.octet());

        let id = self.next_id;
        self.next_id += 1;

        LogEntry {
            id,
            at,
            details: format!("Request from IP 192.168.{a}.{b} - {}", kind.to_lowercase()),
            additional_info: Some(format!("Action: {}", severity.action())),
            kind,
            severity,
        }
    }

    fn continue_after(&mut self, seeded: &[LogEntry]) {
        if let Some(max) = seeded.iter().map(|e| e.id).max() {
            self.continue_ids_from(max + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> NaiveTime {
        NaiveTime::from_hms_opt(14, 30, 0).unwrap()
    }

    #[test]
    fn test_seeded_generators_repeat() {
        let mut a = LogSource::new(SyntheticGenerator::seeded(7));
        let mut b = LogSource::new(SyntheticGenerator::seeded(7));
        for _ in 0..50 {
            assert_eq!(a.next_event(at()), b.next_event(at()));
        }
    }

    #[test]
    fn test_log_entry_shape() {
        let mut src = LogSource::new(SyntheticGenerator::seeded(1));
        let catalog = src.catalog().clone();
        for expected_id in 0..100 {
            let e = src.next_event(at());
            assert_eq!(e.id, expected_id);
            assert_eq!(e.at, at());
            assert!(catalog.kinds.contains(&e.kind));
            assert!(e.details.starts_with("Request from IP 192.168."));
            assert!(e.details.ends_with(&e.kind.to_lowercase()));
            let expected = if e.severity == Severity::Blocked {
                "Action: Blocked & Logged"
            } else {
                "Action: Monitored"
            };
            assert_eq!(e.additional_info.as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_empty_catalog_falls_back() {
        let catalog = LogCatalog {
            kinds: vec![],
            severities: vec![],
        };
        let mut src = LogSource::with_catalog(SyntheticGenerator::seeded(3), catalog);
        let e = src.next_event(at());
        assert_eq!(e.kind, "Unclassified Event");
        assert_eq!(e.severity, Severity::Info);
    }

    #[test]
    fn test_blocked_probability_extremes() {
        let mut never = TimelineSource::new(SyntheticGenerator::seeded(5)).with_blocked_probability(0.0);
        let mut always = TimelineSource::new(SyntheticGenerator::seeded(5)).with_blocked_probability(1.0);
        for _ in 0..200 {
            assert_eq!(never.next_event(at()).kind, TrafficKind::Success);
            assert_eq!(always.next_event(at()).kind, TrafficKind::Blocked);
        }
    }

    #[test]
    fn test_blocked_rate_is_roughly_fifteen_percent() {
        let mut src = TimelineSource::new(SyntheticGenerator::seeded(11));
        let blocked = (0..10_000)
            .filter(|_| src.next_event(at()).kind == TrafficKind::Blocked)
            .count();
        assert!((1200..1800).contains(&blocked), "blocked = {blocked}");
    }

    #[test]
    fn test_continue_ids_never_goes_backwards() {
        let mut src = LogSource::new(SyntheticGenerator::seeded(2));
        src.continue_ids_from(40);
        assert_eq!(src.next_event(at()).id, 40);
        src.continue_ids_from(10);
        assert_eq!(src.next_event(at()).id, 41);
    }
}
