//! egui widgets for each dashboard panel.
//!
//! Every view borrows the state it renders, the same way the panel state is owned by the
//! application and handed to a view once per frame. Views that front a feed pump it before
//! drawing.

mod attack_buttons;
mod charts;
mod header;
mod logs_panel;
mod metrics_grid;
mod timeline;

pub use attack_buttons::AttackButtons;
pub use charts::ChartsView;
pub use header::{HeaderOutput, HeaderState, HeaderView};
pub use logs_panel::LogsView;
pub use metrics_grid::MetricsGridView;
pub use timeline::TimelineView;

use egui::{Color32, Frame, InnerResponse, RichText, Ui};

pub(crate) const CARD_RADIUS: f32 = 8.0;
pub(crate) const CARD_PADDING: f32 = 16.0;
pub(crate) const HEADING_SIZE: f32 = 16.0;

/// Bordered panel background shared by all views.
pub(crate) fn card<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    let visuals = ui.visuals();
    Frame::new()
        .fill(visuals.faint_bg_color)
        .stroke(visuals.widgets.noninteractive.bg_stroke)
        .corner_radius(CARD_RADIUS)
        .inner_margin(CARD_PADDING)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
}

pub(crate) fn heading(ui: &mut Ui, text: impl Into<String>) {
    ui.label(RichText::new(text).size(HEADING_SIZE).strong());
}

pub(crate) fn muted(ui: &Ui, text: impl Into<String>) -> RichText {
    RichText::new(text).small().color(ui.visuals().weak_text_color())
}

/// Small colored pill with a dot, used for status badges.
pub(crate) fn badge(ui: &mut Ui, text: &str, color: Color32, tint: Color32) {
    Frame::new()
        .fill(tint)
        .stroke((1.0, color))
        .corner_radius(CARD_RADIUS)
        .inner_margin(egui::Margin::symmetric(10, 4))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("●").color(color));
                ui.label(RichText::new(text).strong().color(color));
            });
        });
}
