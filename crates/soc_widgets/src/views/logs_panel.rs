use egui::{Align, Frame, Label, Response, RichText, ScrollArea, Ui, Widget};

use super::{card, heading, muted};
use crate::clock::format_hms;
use crate::feed::EventSource;
use crate::logs::{LogEntry, LogsPanel, EMPTY_LOGS_MESSAGE};

/// Scrolling list of log entries, newest at the top.
pub struct LogsView<'a, S>
where
    S: EventSource<Event = LogEntry>,
{
    panel: &'a mut LogsPanel<S>,
    max_height: f32,
}

impl<'a, S> LogsView<'a, S>
where
    S: EventSource<Event = LogEntry> + 'static,
{
    pub fn new(panel: &'a mut LogsPanel<S>) -> Self {
        Self {
            panel,
            max_height: 560.0,
        }
    }

    pub fn with_max_height(mut self, max_height: f32) -> Self {
        self.max_height = max_height;
        self
    }
}

impl<S> Widget for LogsView<'_, S>
where
    S: EventSource<Event = LogEntry> + 'static,
{
    fn ui(self, ui: &mut Ui) -> Response {
        self.panel.pump();
        let scroll = self.panel.take_scroll_request();
        let logs = self.panel.logs();

        card(ui, |ui| {
            heading(ui, format!("REAL-TIME SECURITY LOGS ({} visible)", logs.len()));
            ui.add_space(8.0);

            if logs.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(48.0);
                    ui.label(muted(ui, EMPTY_LOGS_MESSAGE));
                    ui.add_space(48.0);
                });
                return;
            }

            ScrollArea::vertical()
                .id_salt("security_logs")
                .max_height(self.max_height)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    if scroll {
                        ui.scroll_to_cursor(Some(Align::TOP));
                    }
                    for entry in logs.iter() {
                        ui.push_id(entry.id, |ui| log_row(ui, entry));
                        ui.add_space(4.0);
                    }
                });
        })
        .response
    }
}

fn log_row(ui: &mut Ui, entry: &LogEntry) {
    let color = entry.severity.color();
    Frame::new()
        .fill(color.tint(13))
        .stroke((1.0, color.color32()))
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(entry.severity.icon()).color(color.color32()));
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(muted(ui, format!("[{}]", format_hms(entry.at))).monospace());
                        ui.label(
                            RichText::new(entry.severity.label())
                                .monospace()
                                .small()
                                .strong(),
                        );
                    });
                    ui.add(Label::new(&entry.kind).truncate());
                    ui.add(Label::new(muted(ui, &entry.details)).truncate());
                    if let Some(info) = &entry.additional_info {
                        ui.label(muted(ui, info));
                    }
                });
            });
        });
}
