// Shared margins
pub const UI_MARGIN: f32 = 10.0;

// Vertical gap between dashboard rows
pub const SECTION_SPACING: f32 = 16.0;

// Text sizes
pub const DEBUG_MONO_FONT_SIZE: f32 = 13.0; // debug overlay monospace

// Panels specific
pub const METRIC_COLUMNS: usize = 3;
pub const CHARTS_SHARE: f32 = 2.0 / 3.0; // charts take two thirds of the bottom row
pub const LOGS_MAX_HEIGHT: f32 = 640.0;
