use core::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::colors::StatusColor;

pub const COUNT_UP_DURATION: Duration = Duration::from_secs(1);
pub const COUNT_UP_STEPS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub percent: u32,
    pub is_positive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub id: String,
    pub label: String,
    pub value: u64,
    pub color: StatusColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

impl MetricEntry {
    fn sample(id: &str, label: &str, value: u64, color: StatusColor, trend: (u32, bool)) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value,
            color,
            trend: Some(Trend {
                percent: trend.0,
                is_positive: trend.1,
            }),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.id.as_str() {
            "requests" => "🖧",
            "blocked" => "🛡",
            "detection" => "⏱",
            "threat" => "⚠",
            "active" => "⚡",
            "health" => "📈",
            _ => "•",
        }
    }
}

pub fn default_metrics() -> Vec<MetricEntry> {
    vec![
        MetricEntry::sample("requests", "Total Requests", 1_284_567, StatusColor::Blue, (12, true)),
        MetricEntry::sample("blocked", "Blocked Attacks", 342, StatusColor::Critical, (8, false)),
        MetricEntry::sample("detection", "Detection Time (ms)", 145, StatusColor::Safe, (23, true)),
        MetricEntry::sample("threat", "Threat Level", 62, StatusColor::Normal, (5, false)),
        MetricEntry::sample("active", "Active Threats", 18, StatusColor::High, (3, false)),
        MetricEntry::sample("health", "System Health", 98, StatusColor::LightBlue, (2, true)),
    ]
}

/// Counts a displayed number up from zero to `target` in equal steps.
#[derive(Debug, Clone, Copy)]
pub struct CountUp {
    target: u64,
    started: Instant,
}

impl CountUp {
    pub fn new(target: u64, now: Instant) -> Self {
        Self {
            target,
            started: now,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Completed steps at `now`, at most [`COUNT_UP_STEPS`].
    pub fn step_at(&self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.started).as_micros();
        let step = elapsed * u128::from(COUNT_UP_STEPS) / COUNT_UP_DURATION.as_micros();
        step.min(u128::from(COUNT_UP_STEPS)) as u32
    }

    pub fn value_at(&self, now: Instant) -> u64 {
        let step = self.step_at(now);
        if step >= COUNT_UP_STEPS {
            return self.target;
        }
        let v = u128::from(self.target) * u128::from(step) / u128::from(COUNT_UP_STEPS);
        (v as u64).min(self.target)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.step_at(now) >= COUNT_UP_STEPS
    }
}

/// Metric cards and their count-up animations.
#[derive(Debug, Clone)]
pub struct MetricsGrid {
    cards: Vec<(MetricEntry, CountUp)>,
}

impl MetricsGrid {
    pub fn new(metrics: Vec<MetricEntry>, now: Instant) -> Self {
        let cards = metrics
            .into_iter()
            .map(|m| {
                let anim = CountUp::new(m.value, now);
                (m, anim)
            })
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> impl ExactSizeIterator<Item = (&MetricEntry, &CountUp)> {
        self.cards.iter().map(|(m, a)| (m, a))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.cards.iter().any(|(_, a)| !a.is_finished(now))
    }
}

/// `1284567` -> `1,284,567`.
pub fn format_thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(n: u64) -> Duration {
        // one animation step
        Duration::from_micros(n * 16_667)
    }

    #[test]
    fn test_count_up_is_monotonic_and_exact_at_end() {
        let t0 = Instant::now();
        for target in [0, 1, 59, 60, 145, 342, 1_284_567] {
            let anim = CountUp::new(target, t0);
            let mut prev = 0;
            for ms in 0..=1100 {
                let v = anim.value_at(t0 + Duration::from_millis(ms));
                assert!(v >= prev, "target {target}: {v} < {prev} at {ms}ms");
                assert!(v <= target);
                prev = v;
            }
            assert_eq!(anim.value_at(t0 + COUNT_UP_DURATION), target);
            assert!(anim.is_finished(t0 + COUNT_UP_DURATION));
        }
    }

    #[test]
    fn test_count_up_linear_steps() {
        let t0 = Instant::now();
        let anim = CountUp::new(600, t0);
        assert_eq!(anim.value_at(t0), 0);
        assert_eq!(anim.step_at(t0 + frame(1)), 1);
        assert_eq!(anim.value_at(t0 + frame(1)), 10);
        assert_eq!(anim.value_at(t0 + frame(30)), 300);
        assert_eq!(anim.value_at(t0 + Duration::from_secs(5)), 600);
    }

    #[test]
    fn test_grid_stops_animating_after_count_up() {
        let t0 = Instant::now();
        let grid = MetricsGrid::new(default_metrics(), t0);
        assert!(grid.is_animating(t0));
        assert!(!grid.is_animating(t0 + COUNT_UP_DURATION));
        let values: Vec<_> = grid.cards().map(|(_, a)| a.value_at(t0 + COUNT_UP_DURATION)).collect();
        assert_eq!(values[0], 1_284_567);
        assert_eq!(values[1], 342);
    }

    #[test]
    fn test_default_catalog() {
        let ids: Vec<_> = default_metrics().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, ["requests", "blocked", "detection", "threat", "active", "health"]);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_284_567), "1,284,567");
    }
}
