use core::f32::consts::TAU;

use egui::{vec2, Color32, Pos2, Response, RichText, Sense, Shape, Stroke, Ui, Vec2, Widget};
use egui_plot::{HLine, Line, LineStyle, Plot, PlotPoints, Points};

use super::{card, heading, muted};
use crate::charts::{slice_color, slice_spans, Charts, LATENCY_TARGET_MS};
use crate::colors::StatusColor;

const CHART_HEIGHT: f32 = 240.0;
const SLICE_PADDING: f32 = 2.0 * TAU / 360.0;
const ARC_STEP: f32 = TAU / 120.0;
const LATENCY_COLOR: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);

/// Attack distribution donut and detection latency line, side by side.
pub struct ChartsView<'a> {
    charts: &'a Charts,
}

impl<'a> ChartsView<'a> {
    pub fn new(charts: &'a Charts) -> Self {
        Self { charts }
    }
}

impl Widget for ChartsView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.vertical(|ui| {
            ui.columns(2, |cols| {
                distribution_card(&mut cols[0], self.charts);
                latency_card(&mut cols[1], self.charts);
            });
        })
        .response
    }
}

fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + vec2(angle.sin(), -angle.cos()) * radius
}

/// Index of the slice under `offset` (pointer minus donut center), if it lies on the ring.
fn slice_at(spans: &[(f32, f32)], offset: Vec2, inner: f32, outer: f32) -> Option<usize> {
    let r = offset.length();
    if r < inner || r > outer {
        return None;
    }
    let angle = offset.x.atan2(-offset.y).rem_euclid(TAU);
    spans.iter().position(|&(start, end)| angle >= start && angle < end)
}

fn paint_donut(ui: &mut Ui, charts: &Charts) {
    let (rect, resp) = ui.allocate_exact_size(vec2(ui.available_width(), CHART_HEIGHT), Sense::hover());
    let center = rect.center();
    let outer = (rect.height() / 2.0 - 10.0).clamp(10.0, 100.0);
    let inner = outer * 0.6;
    let painter = ui.painter_at(rect);
    let spans = slice_spans(charts.distribution());

    let hovered = resp
        .hover_pos()
        .and_then(|pos| slice_at(&spans, pos - center, inner, outer));
    if let Some(slice) = hovered.and_then(|i| charts.distribution().get(i)) {
        resp.on_hover_text(format!("{}: {}%", slice.category, slice.percentage));
    }

    for (i, &(start, end)) in spans.iter().enumerate() {
        let (start, end) = if end - start > SLICE_PADDING {
            (start + SLICE_PADDING / 2.0, end - SLICE_PADDING / 2.0)
        } else {
            (start, end)
        };
        if end <= start {
            continue;
        }
        let mut color = slice_color(i);
        if hovered == Some(i) {
            color = color.gamma_multiply(0.8);
        }
        // quads stay convex however wide the slice is
        let mut a = start;
        while a < end {
            let b = (a + ARC_STEP).min(end);
            painter.add(Shape::convex_polygon(
                vec![
                    on_circle(center, outer, a),
                    on_circle(center, outer, b),
                    on_circle(center, inner, b),
                    on_circle(center, inner, a),
                ],
                color,
                Stroke::NONE,
            ));
            a = b;
        }
    }
}

fn distribution_card(ui: &mut Ui, charts: &Charts) {
    card(ui, |ui| {
        heading(ui, "Attack Types Distribution");
        ui.add_space(8.0);
        paint_donut(ui, charts);
        ui.add_space(12.0);

        for (i, slice) in charts.distribution().iter().enumerate() {
            ui.horizontal(|ui| {
                ui.label(RichText::new("●").color(slice_color(i)));
                ui.label(muted(ui, &slice.category));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(format!("{}%", slice.percentage)).strong());
                });
            });
        }
    });
}

fn latency_card(ui: &mut Ui, charts: &Charts) {
    card(ui, |ui| {
        heading(ui, format!("Detection Performance (Last {})", charts.latency().len()));
        ui.label(muted(
            ui,
            format!("🎯 Target: <{LATENCY_TARGET_MS}ms (green zone) | ⚠ Alert: >{LATENCY_TARGET_MS}ms (red zone)"),
        ));
        ui.add_space(8.0);

        let series: Vec<[f64; 2]> = charts
            .latency()
            .iter()
            .map(|s| [f64::from(s.index), f64::from(s.latency_ms)])
            .collect();

        Plot::new("detection_latency")
            .height(CHART_HEIGHT)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_y(0.0)
            .y_axis_label("ms")
            .label_formatter(|_, p| format!("#{:.0}: {:.0}ms", p.x, p.y))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("Detection", PlotPoints::from(series.clone()))
                        .color(LATENCY_COLOR)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new("Samples", PlotPoints::from(series))
                        .color(LATENCY_COLOR)
                        .radius(4.0),
                );
                plot_ui.hline(
                    HLine::new("Target (200ms)", f64::from(LATENCY_TARGET_MS))
                        .color(StatusColor::Critical.color32())
                        .style(LineStyle::dashed_loose()),
                );
            });

        ui.add_space(8.0);
        let stats = charts.stats();
        ui.columns(2, |cols| {
            let (avg, max) = stats.map_or_else(
                || ("—".to_string(), "—".to_string()),
                |s| (format!("{}ms", s.average_ms), format!("{}ms", s.max_ms)),
            );
            stat_box(&mut cols[0], "Average", &avg, StatusColor::Safe);
            stat_box(&mut cols[1], "Slowest", &max, StatusColor::Critical);
        });
    });
}

fn stat_box(ui: &mut Ui, label: &str, value: &str, color: StatusColor) {
    egui::Frame::new()
        .fill(color.tint(26))
        .corner_radius(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(muted(ui, label));
                ui.label(RichText::new(value).strong().color(color.color32()));
            });
        });
}
