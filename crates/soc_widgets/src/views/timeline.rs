use egui::{vec2, Align, Layout, Response, RichText, ScrollArea, Sense, Ui, Widget};

use super::{card, heading, muted};
use crate::clock::{format_hms, CLOCK_PLACEHOLDER};
use crate::colors::StatusColor;
use crate::feed::EventSource;
use crate::timeline::{NetworkTimeline, TimelineEvent, TrafficKind, TIMELINE_TICK};

const BLOCK_SIZE: egui::Vec2 = vec2(24.0, 32.0);

/// Rolling row of traffic blocks, oldest on the left.
pub struct TimelineView<'a, S>
where
    S: EventSource<Event = TimelineEvent>,
{
    timeline: &'a mut NetworkTimeline<S>,
}

impl<'a, S> TimelineView<'a, S>
where
    S: EventSource<Event = TimelineEvent> + 'static,
{
    pub fn new(timeline: &'a mut NetworkTimeline<S>) -> Self {
        Self { timeline }
    }
}

fn block_color(kind: TrafficKind) -> StatusColor {
    match kind {
        TrafficKind::Success => StatusColor::Safe,
        TrafficKind::Blocked => StatusColor::Critical,
    }
}

impl<S> Widget for TimelineView<'_, S>
where
    S: EventSource<Event = TimelineEvent> + 'static,
{
    fn ui(self, ui: &mut Ui) -> Response {
        self.timeline.pump();
        let buffer = self.timeline.buffer();
        let counts = buffer.counts();
        let window_secs = TIMELINE_TICK.as_secs() * buffer.capacity() as u64;

        card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    heading(ui, format!("NETWORK ACTIVITY - Last {window_secs} seconds"));
                    ui.label(muted(
                        ui,
                        "Green blocks = Normal traffic | Red blocks = Attack (Blocked)",
                    ));
                });
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(muted(ui, format!("Blocked: {}", counts.blocked)));
                    ui.label(RichText::new("■").color(StatusColor::Critical.color32()));
                    ui.add_space(12.0);
                    ui.label(muted(ui, format!("Success: {}", counts.success)));
                    ui.label(RichText::new("■").color(StatusColor::Safe.color32()));
                });
            });
            ui.add_space(8.0);

            ScrollArea::horizontal()
                .id_salt("timeline_blocks")
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 4.0;
                        for event in buffer.iter() {
                            let (rect, resp) = ui.allocate_exact_size(BLOCK_SIZE, Sense::hover());
                            let mut fill = block_color(event.kind).color32();
                            if resp.hovered() {
                                fill = fill.gamma_multiply(0.8);
                            }
                            ui.painter().rect_filled(rect, 2.0, fill);
                            resp.on_hover_text(format!(
                                "{}\n{}",
                                format_hms(event.at),
                                event.kind.description()
                            ));
                        }
                    });
                });

            ui.add_space(4.0);
            let first = buffer
                .oldest()
                .map_or_else(|| CLOCK_PLACEHOLDER.to_string(), |e| format_hms(e.at));
            let last = buffer
                .newest()
                .map_or_else(|| CLOCK_PLACEHOLDER.to_string(), |e| format_hms(e.at));
            ui.horizontal(|ui| {
                ui.label(muted(ui, first).monospace());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(muted(ui, last).monospace());
                    ui.centered_and_justified(|ui| {
                        ui.label(muted(ui, "Rolling timeline (newest on right)"));
                    });
                });
            });
        })
        .response
    }
}
