//! Security operations center dashboard.
//!
//! [`DashboardApp`] composes the panels from `soc_widgets` into one `eframe` window: it owns
//! the threat level, receives scenario selections from the attack buttons over a channel and
//! hands every other panel its own state once per frame.

mod error;
mod keybindings;
mod metrics;
mod overlays;
mod settings;
mod ui_consts;

pub use error::SettingsError;
pub use keybindings::{command_for_key, dispatch, Command};
pub use settings::{DashboardSettings, SettingsData, SettingsLogs, SettingsTimeline, SETTINGS_FILE};

use crossbeam::channel::{unbounded, Receiver, Sender};
use eframe::{App, CreationContext};
use egui::{CentralPanel, Context, ScrollArea, TopBottomPanel};
use log::{debug, info};
use soc_widgets::views::{
    AttackButtons, ChartsView, HeaderState, HeaderView, LogsView, MetricsGridView, TimelineView,
};
use soc_widgets::{
    default_metrics, AttackPanel, Charts, LogSource, LogsPanel, MetricsGrid, NetworkTimeline,
    ScenarioId, SyntheticGenerator, ThreatLevel, ThreatState, TimelineSource,
};
use web_time::Instant;

use crate::metrics::FrameStats;
use crate::overlays::debug_overlay::{self, DebugInfo};
use crate::ui_consts::{CHARTS_SHARE, LOGS_MAX_HEIGHT, METRIC_COLUMNS, SECTION_SPACING};

pub struct DashboardApp {
    settings: DashboardSettings,

    header: HeaderState,
    threat: ThreatState,
    metrics: MetricsGrid,
    attacks: AttackPanel,
    timeline: NetworkTimeline,
    logs: LogsPanel,
    charts: Charts,

    selections_tx: Sender<ScenarioId>,
    selections_rx: Receiver<ScenarioId>,

    stats: FrameStats,
    show_debug_overlay: bool,
    feeds_paused: bool,
}

impl DashboardApp {
    pub fn new(cc: &CreationContext<'_>, settings: DashboardSettings) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut app = Self::from_settings(settings, Instant::now());
        app.timeline.feed_mut().set_repaint(cc.egui_ctx.clone());
        app.logs.feed_mut().set_repaint(cc.egui_ctx.clone());
        app.resume_feeds();
        app
    }

    /// Builds every panel without a window. Feeds start paused.
    pub fn from_settings(settings: DashboardSettings, now: Instant) -> Self {
        let mut gen = match settings.seed {
            Some(seed) => SyntheticGenerator::seeded(seed),
            None => SyntheticGenerator::from_entropy(),
        };

        let timeline_source = TimelineSource::new(gen.fork())
            .with_blocked_probability(settings.timeline.blocked_probability);
        let mut timeline = NetworkTimeline::with_capacity(timeline_source, settings.timeline.capacity);
        timeline.feed_mut().set_period(settings.timeline_tick());

        let log_source = LogSource::with_catalog(gen.fork(), settings.logs.catalog.clone());
        let mut logs = LogsPanel::new(log_source, settings.logs.max_visible);
        logs.feed_mut().set_period(settings.log_tick());

        let metrics = settings.data.metrics.clone().unwrap_or_else(default_metrics);
        let charts = Charts::new(
            settings.data.distribution.clone(),
            settings.data.latency.clone(),
        );

        let (selections_tx, selections_rx) = unbounded();

        Self {
            header: HeaderState::new(),
            threat: ThreatState::default(),
            metrics: MetricsGrid::new(metrics, now),
            attacks: AttackPanel::new(),
            timeline,
            logs,
            charts,
            selections_tx,
            selections_rx,
            stats: FrameStats::starting_at(now),
            show_debug_overlay: false,
            feeds_paused: true,
            settings,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn threat_level(&self, now: Instant) -> ThreatLevel {
        self.threat.current(now)
    }

    pub fn threat(&self) -> &ThreatState {
        &self.threat
    }

    pub fn attacks(&self) -> &AttackPanel {
        &self.attacks
    }

    pub fn attacks_mut(&mut self) -> &mut AttackPanel {
        &mut self.attacks
    }

    pub fn metrics(&self) -> &MetricsGrid {
        &self.metrics
    }

    pub fn timeline(&self) -> &NetworkTimeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut NetworkTimeline {
        &mut self.timeline
    }

    pub fn logs(&self) -> &LogsPanel {
        &self.logs
    }

    pub fn logs_mut(&mut self) -> &mut LogsPanel {
        &mut self.logs
    }

    pub fn charts(&self) -> &Charts {
        &self.charts
    }

    /// Where the attack buttons report selections.
    pub fn selection_sink(&self) -> Sender<ScenarioId> {
        self.selections_tx.clone()
    }

    pub fn feeds_paused(&self) -> bool {
        self.feeds_paused
    }

    pub fn show_debug_overlay(&self) -> bool {
        self.show_debug_overlay
    }

    pub fn handle_command(&mut self, cmd: Command, now: Instant) {
        match cmd {
            Command::TriggerScenario(id) => self.trigger_scenario(id, now),
            Command::Refresh => {
                if self.header.request_refresh(now) {
                    self.refresh(now);
                }
            }
            Command::ToggleFeeds => self.toggle_feeds(),
            Command::ToggleDebug => self.show_debug_overlay = !self.show_debug_overlay,
        }
    }

    /// Same path as a button click: ignored while the attack panel is disabled.
    pub fn trigger_scenario(&mut self, id: ScenarioId, now: Instant) {
        if self.attacks.activate(id, now) {
            info!("attack scenario selected: {id}");
            self.apply_selection(id, now);
        }
    }

    pub fn apply_selection(&mut self, id: ScenarioId, now: Instant) {
        let level = self.threat.select(id, now);
        info!("threat level {level} after {id}");
    }

    /// Applies selections queued by the attack buttons. Returns how many there were.
    pub fn drain_selections(&mut self, now: Instant) -> usize {
        let pending: Vec<_> = self.selections_rx.try_iter().collect();
        for id in &pending {
            self.apply_selection(*id, now);
        }
        pending.len()
    }

    pub fn poll_threat(&mut self, now: Instant) {
        if let Some(level) = self.threat.revert_expired(now) {
            debug!("threat level {level} expired, back to {}", ThreatLevel::Normal);
        }
    }

    /// Replays the metric count-up.
    pub fn refresh(&mut self, now: Instant) {
        let entries = self.metrics.cards().map(|(m, _)| m.clone()).collect();
        self.metrics = MetricsGrid::new(entries, now);
        info!("Dashboard refreshed");
    }

    pub fn toggle_feeds(&mut self) {
        if self.feeds_paused {
            self.resume_feeds();
        } else {
            self.pause_feeds();
        }
    }

    pub fn pause_feeds(&mut self) {
        self.timeline.detach();
        self.logs.detach();
        self.feeds_paused = true;
        info!("synthetic feeds paused");
    }

    pub fn resume_feeds(&mut self) {
        self.timeline.attach();
        self.logs.attach();
        self.feeds_paused = false;
        info!("synthetic feeds running");
    }

    fn schedule_repaint(&self, ctx: &Context, now: Instant) {
        let deadlines = [
            self.threat.hold_remaining(now),
            self.attacks.execution_remaining(now),
        ];
        if let Some(next) = deadlines.into_iter().flatten().min() {
            ctx.request_repaint_after(next);
        }
        if self.show_debug_overlay {
            ctx.request_repaint();
        }
    }

    fn render_debug_overlay(&self, ui: &mut egui::Ui, now: Instant) {
        let info = DebugInfo {
            stats: &self.stats,
            feeds: [
                (self.timeline.feed().label(), self.timeline.feed().is_attached()),
                (self.logs.feed().label(), self.logs.feed().is_attached()),
            ],
            timeline_len: self.timeline.buffer().len(),
            logs_len: self.logs.logs().len(),
            threat_hold: self.threat.hold_remaining(now),
        };
        debug_overlay::render(ui, &info);
    }
}

impl App for DashboardApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.stats.record_frame(now);

        for cmd in dispatch(ctx) {
            self.handle_command(cmd, now);
        }
        self.drain_selections(now);
        self.poll_threat(now);

        TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            let out = HeaderView::new(&mut self.header)
                .with_title(&self.settings.title, &self.settings.subtitle)
                .with_threat_level(self.threat.current(now))
                .with_last_attack(self.threat.last_attack())
                .show(ui);
            ui.add_space(8.0);
            if out.refresh_requested {
                self.refresh(now);
            }
        });

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
                ui.add(MetricsGridView::new(&self.metrics).with_columns(METRIC_COLUMNS));
                ui.add_space(SECTION_SPACING);

                ui.add(AttackButtons::new(&mut self.attacks).with_sink(&self.selections_tx));
                ui.add_space(SECTION_SPACING);

                ui.add(TimelineView::new(&mut self.timeline));
                ui.add_space(SECTION_SPACING);

                ui.horizontal_top(|ui| {
                    let spacing = ui.spacing().item_spacing.x;
                    let charts_width = (ui.available_width() - spacing) * CHARTS_SHARE;
                    ui.allocate_ui(egui::vec2(charts_width, 0.0), |ui| {
                        ui.add(ChartsView::new(&self.charts));
                    });
                    ui.allocate_ui(egui::vec2(ui.available_width(), 0.0), |ui| {
                        ui.add(LogsView::new(&mut self.logs).with_max_height(LOGS_MAX_HEIGHT));
                    });
                });
            });

            if self.show_debug_overlay {
                self.render_debug_overlay(ui, now);
            }
        });

        self.schedule_repaint(ctx, now);
    }
}
