use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use crossbeam::channel::Sender;
use log::debug;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::colors::StatusColor;
use crate::timed::TimedFlag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioId {
    Demo,
    Ddos,
    SimSwap,
    Cred,
    Malware,
    Custom,
}

impl ScenarioId {
    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioId::Demo => "demo",
            ScenarioId::Ddos => "ddos",
            ScenarioId::SimSwap => "simswap",
            ScenarioId::Cred => "cred",
            ScenarioId::Malware => "malware",
            ScenarioId::Custom => "custom",
        }
    }

    pub fn scenario(self) -> &'static AttackScenario {
        SCENARIOS
            .iter()
            .find(|s| s.id == self)
            .unwrap_or(&SCENARIOS[0])
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SCENARIOS
            .iter()
            .map(|sc| sc.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown attack scenario: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackScenario {
    pub id: ScenarioId,
    pub label: &'static str,
    pub icon: &'static str,
    pub fill: StatusColor,
}

pub const SCENARIOS: [AttackScenario; 6] = [
    AttackScenario {
        id: ScenarioId::Demo,
        label: "Run Full Demo",
        icon: "▶",
        fill: StatusColor::Critical,
    },
    AttackScenario {
        id: ScenarioId::Ddos,
        label: "DDoS Attack",
        icon: "⚡",
        fill: StatusColor::High,
    },
    AttackScenario {
        id: ScenarioId::SimSwap,
        label: "SIM Swap",
        icon: "📱",
        fill: StatusColor::Blue,
    },
    AttackScenario {
        id: ScenarioId::Cred,
        label: "Credential Theft",
        icon: "⚠",
        fill: StatusColor::Normal,
    },
    AttackScenario {
        id: ScenarioId::Malware,
        label: "Malware",
        icon: "🛡",
        fill: StatusColor::Purple,
    },
    AttackScenario {
        id: ScenarioId::Custom,
        label: "Custom Attack",
        icon: "</>",
        fill: StatusColor::Slate,
    },
];

/// Receives scenario selections from the attack buttons.
/// Works with `crossbeam::Sender<ScenarioId>` and closures `Fn(ScenarioId)`.
pub trait ScenarioSink {
    fn send(&self, id: ScenarioId);
}

impl ScenarioSink for Sender<ScenarioId> {
    fn send(&self, id: ScenarioId) {
        if Sender::send(self, id).is_err() {
            debug!("scenario {id} dropped: selection receiver is gone");
        }
    }
}

impl<F: Fn(ScenarioId)> ScenarioSink for F {
    fn send(&self, id: ScenarioId) {
        self(id);
    }
}

/// Active/executing state of the scenario buttons.
#[derive(Debug, Clone)]
pub struct AttackPanel {
    active: Option<ScenarioId>,
    executing: TimedFlag<ScenarioId>,
    disabled: bool,
}

impl Default for AttackPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AttackPanel {
    /// How long a triggered button pulses.
    pub const EXECUTION: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self {
            active: None,
            executing: TimedFlag::new(Self::EXECUTION),
            disabled: false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Marks `id` active and executing. Returns `false` (and changes nothing) when disabled.
    pub fn activate(&mut self, id: ScenarioId, now: Instant) -> bool {
        if self.disabled {
            return false;
        }
        self.active = Some(id);
        self.executing.set(id, now);
        true
    }

    pub fn active(&self) -> Option<ScenarioId> {
        self.active
    }

    pub fn executing(&self, now: Instant) -> Option<ScenarioId> {
        self.executing.get(now).copied()
    }

    pub fn is_active(&self, id: ScenarioId) -> bool {
        self.active == Some(id)
    }

    pub fn is_executing(&self, id: ScenarioId, now: Instant) -> bool {
        self.executing(now) == Some(id)
    }

    /// Time left on the running execution, if any.
    pub fn execution_remaining(&self, now: Instant) -> Option<Duration> {
        self.executing.remaining(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_executing_clears_after_two_seconds_active_stays() {
        let t0 = Instant::now();
        let mut panel = AttackPanel::new();
        assert!(panel.activate(ScenarioId::Demo, t0));

        assert!(panel.is_active(ScenarioId::Demo));
        assert!(panel.is_executing(ScenarioId::Demo, t0));
        assert!(panel.is_executing(ScenarioId::Demo, t0 + Duration::from_millis(1999)));

        let after = t0 + Duration::from_secs(2);
        assert!(!panel.is_executing(ScenarioId::Demo, after));
        assert!(panel.is_active(ScenarioId::Demo));

        let much_later = t0 + Duration::from_secs(60);
        assert!(panel.is_active(ScenarioId::Demo));
        assert!(panel.activate(ScenarioId::Ddos, much_later));
        assert!(!panel.is_active(ScenarioId::Demo));
        assert!(panel.is_active(ScenarioId::Ddos));
        assert!(panel.is_executing(ScenarioId::Ddos, much_later));
    }

    #[test]
    fn test_disabled_suppresses_activation() {
        let t0 = Instant::now();
        let mut panel = AttackPanel::new();
        panel.set_disabled(true);
        assert!(!panel.activate(ScenarioId::Malware, t0));
        assert_eq!(panel.active(), None);
        assert_eq!(panel.executing(t0), None);
    }

    #[test]
    fn test_ids_round_trip_through_strings() {
        for sc in &SCENARIOS {
            assert_eq!(sc.id.as_str().parse::<ScenarioId>(), Ok(sc.id));
            assert_eq!(sc.id.scenario(), sc);
        }
        assert!("phishing".parse::<ScenarioId>().is_err());
        assert_eq!(serde_json::to_string(&ScenarioId::SimSwap).unwrap(), r#""simswap""#);
    }

    #[test]
    fn test_sinks() {
        let (tx, rx) = crossbeam::channel::unbounded();
        ScenarioSink::send(&tx, ScenarioId::Cred);
        assert_eq!(rx.try_recv(), Ok(ScenarioId::Cred));

        let seen = RefCell::new(Vec::new());
        let sink = |id: ScenarioId| seen.borrow_mut().push(id);
        sink.send(ScenarioId::Custom);
        assert_eq!(seen.into_inner(), vec![ScenarioId::Custom]);
    }

    #[test]
    fn test_sender_sink_tolerates_dropped_receiver() {
        let (tx, rx) = crossbeam::channel::unbounded();
        drop(rx);
        ScenarioSink::send(&tx, ScenarioId::Ddos);
        assert!(tx.is_empty());
    }
}
