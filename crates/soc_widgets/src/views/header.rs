use core::time::Duration;

use chrono::Local;
use egui::{Align, Button, Layout, RichText, Ui};
use web_time::Instant;

use super::{badge, muted};
use crate::clock::{format_hms, since_label};
use crate::colors::StatusColor;
use crate::threat::ThreatLevel;
use crate::timed::TimedFlag;

/// Shown until the first scenario is triggered.
const LAST_ATTACK_SAMPLE: &str = "2 minutes ago";

/// Header-local state: the refresh button spinner.
#[derive(Debug, Clone)]
pub struct HeaderState {
    refreshing: TimedFlag<()>,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderState {
    pub const REFRESH_SPIN: Duration = Duration::from_millis(600);

    pub fn new() -> Self {
        Self {
            refreshing: TimedFlag::new(Self::REFRESH_SPIN),
        }
    }

    /// Starts the spinner. Returns `false` while a previous refresh is still spinning.
    pub fn request_refresh(&mut self, now: Instant) -> bool {
        if self.refreshing.is_set(now) {
            return false;
        }
        self.refreshing.set((), now);
        true
    }

    pub fn is_refreshing(&self, now: Instant) -> bool {
        self.refreshing.is_set(now)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderOutput {
    pub refresh_requested: bool,
}

/// Title, threat badge, clock and refresh control.
pub struct HeaderView<'a> {
    state: &'a mut HeaderState,
    title: &'a str,
    subtitle: &'a str,
    level: ThreatLevel,
    last_attack: Option<Instant>,
}

impl<'a> HeaderView<'a> {
    pub fn new(state: &'a mut HeaderState) -> Self {
        Self {
            state,
            title: "SOC",
            subtitle: "Security Operations Center",
            level: ThreatLevel::Safe,
            last_attack: None,
        }
    }

    pub fn with_title(mut self, title: &'a str, subtitle: &'a str) -> Self {
        self.title = title;
        self.subtitle = subtitle;
        self
    }

    pub fn with_threat_level(mut self, level: ThreatLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_last_attack(mut self, at: Option<Instant>) -> Self {
        self.last_attack = at;
        self
    }

    pub fn show(self, ui: &mut Ui) -> HeaderOutput {
        let now = Instant::now();
        let mut out = HeaderOutput::default();

        ui.horizontal(|ui| {
            ui.label(
                RichText::new("⚠")
                    .size(28.0)
                    .color(ui.visuals().selection.bg_fill),
            );
            ui.vertical(|ui| {
                ui.label(RichText::new(self.title).size(22.0).strong());
                ui.label(muted(ui, self.subtitle));
            });

            ui.add_space(32.0);

            let level = self.level.color();
            badge(ui, self.level.label(), level.color32(), level.tint(26));
            badge(
                ui,
                "Online",
                StatusColor::Safe.color32(),
                StatusColor::Safe.tint(26),
            );

            ui.add_space(16.0);
            let local = Local::now();
            ui.vertical(|ui| {
                ui.label(RichText::new(format_hms(local.time())).monospace().size(18.0).strong());
                ui.label(muted(ui, local.format("UTC%:z").to_string()));
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let spinning = self.state.is_refreshing(now);
                let icon = if spinning { "⟳ …" } else { "⟳" };
                let refresh = ui
                    .add_enabled(!spinning, Button::new(RichText::new(icon).size(18.0)))
                    .on_hover_text("Refresh dashboard (R)");
                if refresh.clicked() && self.state.request_refresh(now) {
                    out.refresh_requested = true;
                }

                ui.add_space(12.0);
                ui.vertical(|ui| {
                    let ago = self.last_attack.map_or_else(
                        || LAST_ATTACK_SAMPLE.to_string(),
                        |at| since_label(now.saturating_duration_since(at)),
                    );
                    ui.label(muted(ui, "Last Attack"));
                    ui.label(RichText::new(ago).strong());
                });
            });
        });

        // clock ticks once per second; the spinner needs a frame when it stops
        let next = self
            .state
            .refreshing
            .remaining(now)
            .map_or(Duration::from_secs(1), |d| d.min(Duration::from_secs(1)));
        ui.ctx().request_repaint_after(next);

        out
    }
}
