use egui::{Button, Color32, Response, RichText, Stroke, Ui, Widget};
use log::info;
use web_time::Instant;

use super::{card, heading, muted};
use crate::attack::{AttackPanel, ScenarioSink, SCENARIOS};

/// Row of scenario buttons.
///
/// Clicking a button marks it active and executing on the borrowed [`AttackPanel`] and forwards
/// the scenario id to the sink, if one is set. Nothing happens while the panel is disabled.
pub struct AttackButtons<'a> {
    panel: &'a mut AttackPanel,
    sink: Option<&'a dyn ScenarioSink>,
}

impl<'a> AttackButtons<'a> {
    pub fn new(panel: &'a mut AttackPanel) -> Self {
        Self { panel, sink: None }
    }

    pub fn with_sink(mut self, sink: &'a dyn ScenarioSink) -> Self {
        self.sink = Some(sink);
        self
    }
}

impl Widget for AttackButtons<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let now = Instant::now();
        let pulse = (ui.input(|i| i.time) * 6.0).sin() as f32 * 0.5 + 0.5;
        let ring = ui.visuals().selection.stroke.color;
        let enabled = !self.panel.is_disabled();

        let resp = card(ui, |ui| {
            heading(ui, "ATTACK SCENARIOS - Choose & Execute");
            ui.add_space(8.0);

            ui.horizontal_wrapped(|ui| {
                for scenario in &SCENARIOS {
                    let mut fill = scenario.fill.color32();
                    if self.panel.is_executing(scenario.id, now) {
                        fill = fill.gamma_multiply(0.55 + 0.45 * pulse);
                    }
                    let stroke = if self.panel.is_active(scenario.id) {
                        Stroke::new(2.0, ring)
                    } else {
                        Stroke::NONE
                    };
                    let text = RichText::new(format!("{} {}", scenario.icon, scenario.label))
                        .strong()
                        .color(Color32::WHITE);
                    let clicked = ui
                        .add_enabled(enabled, Button::new(text).fill(fill).stroke(stroke))
                        .clicked();

                    if clicked && self.panel.activate(scenario.id, now) {
                        info!("attack scenario selected: {}", scenario.id);
                        if let Some(sink) = self.sink {
                            sink.send(scenario.id);
                        }
                    }
                }
            });

            ui.add_space(8.0);
            ui.separator();
            ui.label(muted(
                ui,
                "💡 Click any button to simulate an attack scenario and see real-time detection.",
            ));
        })
        .response;

        if self.panel.executing(now).is_some() {
            ui.ctx().request_repaint();
        }
        resp
    }
}
