use core::f32::consts::TAU;

use egui::Color32;
use serde::{Deserialize, Serialize};

/// Reference line on the latency chart.
pub const LATENCY_TARGET_MS: u32 = 200;

/// Slice colors, assigned cyclically by index.
pub const SLICE_PALETTE: [Color32; 4] = [
    Color32::from_rgb(0xEF, 0x44, 0x44),
    Color32::from_rgb(0xF9, 0x73, 0x16),
    Color32::from_rgb(0x3B, 0x82, 0xF6),
    Color32::from_rgb(0x8B, 0x5C, 0xF6),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub category: String,
    pub percentage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySample {
    pub index: u32,
    pub latency_ms: u32,
}

pub fn default_distribution() -> Vec<DistributionSlice> {
    [("DDoS", 40.0), ("Malware", 25.0), ("SIM Swap", 20.0), ("Other", 15.0)]
        .into_iter()
        .map(|(category, percentage)| DistributionSlice {
            category: category.to_string(),
            percentage,
        })
        .collect()
}

pub fn default_latency() -> Vec<LatencySample> {
    [145, 167, 132, 189, 178, 156, 142, 198, 151, 164]
        .into_iter()
        .zip(1..)
        .map(|(latency_ms, index)| LatencySample { index, latency_ms })
        .collect()
}

pub fn slice_color(index: usize) -> Color32 {
    SLICE_PALETTE[index % SLICE_PALETTE.len()]
}

/// Start and end angle (radians, clockwise from 12 o'clock) of each slice.
///
/// Slices are proportional to their share of the total, so the spans always close the circle
/// unless every percentage is zero or negative, in which case all spans are empty.
pub fn slice_spans(slices: &[DistributionSlice]) -> Vec<(f32, f32)> {
    let total: f32 = slices.iter().map(|s| s.percentage.max(0.0)).sum();
    let mut start = 0.0;
    slices
        .iter()
        .map(|s| {
            let sweep = if total > 0.0 {
                s.percentage.max(0.0) / total * TAU
            } else {
                0.0
            };
            let span = (start, start + sweep);
            start += sweep;
            span
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    /// Arithmetic mean, rounded half up.
    pub average_ms: u32,
    pub max_ms: u32,
}

impl LatencyStats {
    /// `None` for an empty series.
    pub fn from_samples(samples: &[LatencySample]) -> Option<Self> {
        let max_ms = samples.iter().map(|s| s.latency_ms).max()?;
        let sum: u64 = samples.iter().map(|s| u64::from(s.latency_ms)).sum();
        let average_ms = (sum as f64 / samples.len() as f64).round() as u32;
        Some(Self { average_ms, max_ms })
    }

    pub fn over_target(&self) -> bool {
        self.max_ms > LATENCY_TARGET_MS
    }
}

/// Data behind the charts row; defaults unless the caller overrides either series.
#[derive(Debug, Clone)]
pub struct Charts {
    distribution: Vec<DistributionSlice>,
    latency: Vec<LatencySample>,
    stats: Option<LatencyStats>,
}

impl Default for Charts {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl Charts {
    pub fn new(
        distribution: Option<Vec<DistributionSlice>>,
        latency: Option<Vec<LatencySample>>,
    ) -> Self {
        let latency = latency.unwrap_or_else(default_latency);
        Self {
            distribution: distribution.unwrap_or_else(default_distribution),
            stats: LatencyStats::from_samples(&latency),
            latency,
        }
    }

    pub fn distribution(&self) -> &[DistributionSlice] {
        &self.distribution
    }

    pub fn latency(&self) -> &[LatencySample] {
        &self.latency
    }

    pub fn stats(&self) -> Option<LatencyStats> {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_latency_stats() {
        let stats = LatencyStats::from_samples(&default_latency()).unwrap();
        assert_eq!(stats, LatencyStats { average_ms: 162, max_ms: 198 });
        assert!(!stats.over_target());
    }

    #[test]
    fn test_average_rounds_half_up() {
        let samples: Vec<_> = [100, 101]
            .into_iter()
            .zip(1..)
            .map(|(latency_ms, index)| LatencySample { index, latency_ms })
            .collect();
        assert_eq!(LatencyStats::from_samples(&samples).unwrap().average_ms, 101);
    }

    #[test]
    fn test_empty_series_has_no_stats() {
        assert_eq!(LatencyStats::from_samples(&[]), None);
        assert_eq!(Charts::new(None, Some(vec![])).stats(), None);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(slice_color(0), slice_color(4));
        assert_eq!(slice_color(3), Color32::from_rgb(0x8B, 0x5C, 0xF6));
        assert_ne!(slice_color(1), slice_color(2));
    }

    #[test]
    fn test_slice_spans_close_the_circle() {
        let spans = slice_spans(&default_distribution());
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].0, 0.0);
        assert!((spans[0].1 - 0.4 * TAU).abs() < 1e-5);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert!((spans[3].1 - TAU).abs() < 1e-4);
    }

    #[test]
    fn test_slice_spans_all_zero() {
        let slices = vec![DistributionSlice {
            category: "None".into(),
            percentage: 0.0,
        }];
        assert_eq!(slice_spans(&slices), vec![(0.0, 0.0)]);
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let charts = Charts::new(
            Some(vec![DistributionSlice {
                category: "Phishing".into(),
                percentage: 100.0,
            }]),
            None,
        );
        assert_eq!(charts.distribution().len(), 1);
        assert_eq!(charts.latency().len(), 10);
    }
}
