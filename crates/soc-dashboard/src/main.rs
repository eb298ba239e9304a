use std::path::Path;

use eframe::{run_native, NativeOptions};
use egui::ViewportBuilder;
use soc_dashboard::{DashboardApp, DashboardSettings, SETTINGS_FILE};

const INITIAL_WINDOW_SIZE: [f32; 2] = [1440.0, 960.0];
const MIN_WINDOW_SIZE: [f32; 2] = [960.0, 640.0];

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = DashboardSettings::load_or_default(Path::new(SETTINGS_FILE));
    let title = settings.title.clone();

    let native_options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title(&title)
            .with_inner_size(INITIAL_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE),
        ..Default::default()
    };
    run_native(
        &title,
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, settings)))),
    )
}
