use core::time::Duration;

use egui::{FontId, Pos2, Rect, Ui};

use crate::metrics::FrameStats;
use crate::ui_consts::{DEBUG_MONO_FONT_SIZE, UI_MARGIN};

/// Snapshot of what the overlay prints, gathered by the app each frame.
pub struct DebugInfo<'a> {
    pub stats: &'a FrameStats,
    pub feeds: [(&'static str, bool); 2],
    pub timeline_len: usize,
    pub logs_len: usize,
    pub threat_hold: Option<Duration>,
}

pub fn lines(info: &DebugInfo<'_>) -> Vec<String> {
    let mut lines = vec![format!("FPS: {:.1}", info.stats.fps())];
    for (label, attached) in info.feeds {
        let state = if attached { "running" } else { "paused" };
        lines.push(format!("{label}: {state}"));
    }
    lines.push(format!("Timeline: {}", info.timeline_len));
    lines.push(format!("Logs: {}", info.logs_len));
    match info.threat_hold {
        Some(left) => lines.push(format!("Threat hold: {:.1}s", left.as_secs_f32())),
        None => lines.push("Threat hold: -".to_string()),
    }
    lines
}

pub fn render(ui: &mut Ui, info: &DebugInfo<'_>) {
    let text = lines(info).join("\n");

    let text_color = ui.style().visuals.strong_text_color();
    let panel_rect: Rect = ui.max_rect();
    let font_id = FontId::monospace(DEBUG_MONO_FONT_SIZE);
    let galley = ui.fonts(|f| f.layout_no_wrap(text, font_id, text_color));
    let pos = Pos2::new(
        panel_rect.right() - UI_MARGIN - galley.size().x,
        panel_rect.top() + UI_MARGIN,
    );
    let painter = ui.painter_at(panel_rect);
    painter.galley(pos, galley, text_color);
}
