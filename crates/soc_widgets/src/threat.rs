use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::attack::ScenarioId;
use crate::colors::StatusColor;
use crate::timed::TimedFlag;

/// How long a scenario keeps the threat level raised.
pub const THREAT_HOLD: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    Critical,
    High,
    #[default]
    Normal,
    Safe,
}

impl ThreatLevel {
    pub fn for_scenario(id: ScenarioId) -> Self {
        match id {
            ScenarioId::Demo | ScenarioId::Malware => ThreatLevel::Critical,
            ScenarioId::Ddos | ScenarioId::SimSwap => ThreatLevel::High,
            ScenarioId::Cred | ScenarioId::Custom => ThreatLevel::Normal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::Critical => "CRITICAL",
            ThreatLevel::High => "HIGH",
            ThreatLevel::Normal => "NORMAL",
            ThreatLevel::Safe => "SAFE",
        }
    }

    pub fn color(self) -> StatusColor {
        match self {
            ThreatLevel::Critical => StatusColor::Critical,
            ThreatLevel::High => StatusColor::High,
            ThreatLevel::Normal => StatusColor::Normal,
            ThreatLevel::Safe => StatusColor::Safe,
        }
    }
}

impl fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dashboard-owned threat level: raised by a scenario, back to NORMAL after [`THREAT_HOLD`].
///
/// Each selection restarts the hold, so the latest scenario decides both the level and when it
/// reverts.
#[derive(Debug, Clone)]
pub struct ThreatState {
    raised: TimedFlag<ThreatLevel>,
    last_attack: Option<Instant>,
}

impl Default for ThreatState {
    fn default() -> Self {
        Self::new(THREAT_HOLD)
    }
}

impl ThreatState {
    pub fn new(hold: Duration) -> Self {
        Self {
            raised: TimedFlag::new(hold),
            last_attack: None,
        }
    }

    /// Applies a scenario selection and returns the level it maps to.
    pub fn select(&mut self, id: ScenarioId, now: Instant) -> ThreatLevel {
        let level = ThreatLevel::for_scenario(id);
        self.raised.set(level, now);
        self.last_attack = Some(now);
        level
    }

    pub fn current(&self, now: Instant) -> ThreatLevel {
        self.raised.get(now).copied().unwrap_or_default()
    }

    /// Clears an expired raise; returns the level that just reverted.
    pub fn revert_expired(&mut self, now: Instant) -> Option<ThreatLevel> {
        self.raised.take_expired(now)
    }

    pub fn last_attack(&self) -> Option<Instant> {
        self.last_attack
    }

    pub fn hold_remaining(&self, now: Instant) -> Option<Duration> {
        self.raised.remaining(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ddos_raises_high_then_reverts() {
        let t0 = Instant::now();
        let mut state = ThreatState::default();
        assert_eq!(state.current(t0), ThreatLevel::Normal);

        assert_eq!(state.select(ScenarioId::Ddos, t0), ThreatLevel::High);
        assert_eq!(state.current(t0), ThreatLevel::High);
        assert_eq!(state.current(t0 + Duration::from_millis(4999)), ThreatLevel::High);

        let after = t0 + Duration::from_secs(5);
        assert_eq!(state.current(after), ThreatLevel::Normal);
        assert_eq!(state.revert_expired(after), Some(ThreatLevel::High));
        assert_eq!(state.revert_expired(after), None);
        assert_eq!(state.last_attack(), Some(t0));
    }

    #[test]
    fn test_latest_selection_wins() {
        let t0 = Instant::now();
        let mut state = ThreatState::default();
        state.select(ScenarioId::Demo, t0);
        let t1 = t0 + Duration::from_secs(3);
        state.select(ScenarioId::SimSwap, t1);

        assert_eq!(state.current(t0 + Duration::from_secs(6)), ThreatLevel::High);
        assert_eq!(state.current(t1 + THREAT_HOLD), ThreatLevel::Normal);
    }

    #[test]
    fn test_scenario_mapping() {
        use ScenarioId::{Cred, Custom, Ddos, Demo, Malware, SimSwap};
        let got: Vec<_> = [Demo, Ddos, SimSwap, Cred, Malware, Custom]
            .into_iter()
            .map(ThreatLevel::for_scenario)
            .collect();
        assert_eq!(
            got,
            [
                ThreatLevel::Critical,
                ThreatLevel::High,
                ThreatLevel::High,
                ThreatLevel::Normal,
                ThreatLevel::Critical,
                ThreatLevel::Normal,
            ]
        );
    }
}
