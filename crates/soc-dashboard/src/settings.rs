// Dashboard settings, optionally loaded from a JSON file next to the binary's working directory

use core::time::Duration;
use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use soc_widgets::{
    DistributionSlice, LatencySample, LogCatalog, MetricEntry, DEFAULT_BLOCKED_PROBABILITY,
    LOG_TICK, TIMELINE_CAPACITY, TIMELINE_TICK,
};

use crate::error::SettingsError;

pub const SETTINGS_FILE: &str = "soc-dashboard.json";

// Logs panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsLogs {
    pub max_visible: usize,
    pub tick_ms: u64,
    pub catalog: LogCatalog,
}

impl Default for SettingsLogs {
    fn default() -> Self {
        Self {
            max_visible: 15,
            tick_ms: LOG_TICK.as_millis() as u64,
            catalog: LogCatalog::default(),
        }
    }
}

// Network timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsTimeline {
    pub capacity: usize,
    pub tick_ms: u64,
    pub blocked_probability: f64,
}

impl Default for SettingsTimeline {
    fn default() -> Self {
        Self {
            capacity: TIMELINE_CAPACITY,
            tick_ms: TIMELINE_TICK.as_millis() as u64,
            blocked_probability: DEFAULT_BLOCKED_PROBABILITY,
        }
    }
}

// Sample data shown instead of the built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub metrics: Option<Vec<MetricEntry>>,
    pub distribution: Option<Vec<DistributionSlice>>,
    pub latency: Option<Vec<LatencySample>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub title: String,
    pub subtitle: String,
    /// Seeds every synthetic feed; random when absent.
    pub seed: Option<u64>,
    pub logs: SettingsLogs,
    pub timeline: SettingsTimeline,
    pub data: SettingsData,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "Azercell CSCI".to_string(),
            subtitle: "Security Operations Center".to_string(),
            seed: None,
            logs: SettingsLogs::default(),
            timeline: SettingsTimeline::default(),
            data: SettingsData::default(),
        }
    }
}

impl DashboardSettings {
    pub fn from_json(text: &str, path: &Path) -> Result<Self, SettingsError> {
        serde_json::from_str(text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text, path).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Never fails: problems are logged and the defaults used instead.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(Some(settings)) => {
                info!("settings loaded from {}", path.display());
                settings
            }
            Ok(None) => {
                info!("no {} found, using default settings", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    pub fn log_tick(&self) -> Duration {
        Duration::from_millis(self.logs.tick_ms.max(1))
    }

    pub fn timeline_tick(&self) -> Duration {
        Duration::from_millis(self.timeline.tick_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dashboard_layout() {
        let s = DashboardSettings::default();
        assert_eq!(s.logs.max_visible, 15);
        assert_eq!(s.timeline.capacity, 30);
        assert_eq!(s.log_tick(), Duration::from_secs(2));
        assert_eq!(s.timeline_tick(), Duration::from_secs(1));
        assert_eq!(s.timeline.blocked_probability, 0.15);
    }

    #[test]
    fn test_partial_json_fills_in_defaults() {
        let s = DashboardSettings::from_json(
            r#"{ "seed": 42, "logs": { "max_visible": 5 } }"#,
            Path::new("inline.json"),
        )
        .unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.logs.max_visible, 5);
        assert_eq!(s.logs.tick_ms, 2000);
        assert_eq!(s.logs.catalog.kinds.len(), 10);
        assert_eq!(s.title, "Azercell CSCI");
    }

    #[test]
    fn test_data_overrides_parse() {
        let s = DashboardSettings::from_json(
            r#"{
                "data": {
                    "latency": [{ "index": 1, "latency_ms": 250 }],
                    "metrics": [{ "id": "requests", "label": "Requests", "value": 10, "color": "blue" }]
                }
            }"#,
            Path::new("inline.json"),
        )
        .unwrap();
        assert_eq!(s.data.latency.as_ref().map(Vec::len), Some(1));
        let metrics = s.data.metrics.unwrap();
        assert_eq!(metrics[0].trend, None);
        assert_eq!(s.data.distribution, None);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err = DashboardSettings::from_json("{ nope", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().starts_with("invalid settings in broken.json"));
    }

    #[test]
    fn test_zero_ticks_are_clamped() {
        let mut s = DashboardSettings::default();
        s.logs.tick_ms = 0;
        assert_eq!(s.log_tick(), Duration::from_millis(1));
    }
}
