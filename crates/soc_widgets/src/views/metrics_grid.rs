use egui::{Align, Layout, Response, RichText, Ui, Widget};
use web_time::Instant;

use super::{card, muted};
use crate::colors::StatusColor;
use crate::metrics::{format_thousands, CountUp, MetricEntry, MetricsGrid};

/// Metric cards laid out in rows of `columns`.
pub struct MetricsGridView<'a> {
    grid: &'a MetricsGrid,
    columns: usize,
}

impl<'a> MetricsGridView<'a> {
    pub fn new(grid: &'a MetricsGrid) -> Self {
        Self { grid, columns: 3 }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }
}

impl Widget for MetricsGridView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        let now = Instant::now();
        let cards: Vec<_> = self.grid.cards().collect();

        let resp = ui
            .vertical(|ui| {
                for row in cards.chunks(self.columns) {
                    ui.columns(self.columns, |cols| {
                        for (col, (metric, anim)) in cols.iter_mut().zip(row) {
                            metric_card(col, metric, anim, now);
                        }
                    });
                    ui.add_space(8.0);
                }
            })
            .response;

        if self.grid.is_animating(now) {
            ui.ctx().request_repaint();
        }
        resp
    }
}

fn metric_card(ui: &mut Ui, metric: &MetricEntry, anim: &CountUp, now: Instant) {
    card(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(metric.icon())
                    .size(22.0)
                    .color(metric.color.color32()),
            );
            if let Some(trend) = metric.trend {
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let color = if trend.is_positive {
                        StatusColor::Safe
                    } else {
                        StatusColor::Critical
                    };
                    ui.label(
                        RichText::new(format!("📈 {}%", trend.percent))
                            .strong()
                            .color(color.color32()),
                    );
                });
            }
        });
        ui.add_space(8.0);
        ui.label(
            RichText::new(format_thousands(anim.value_at(now)))
                .size(28.0)
                .strong(),
        );
        ui.label(muted(ui, &metric.label));
    });
}
