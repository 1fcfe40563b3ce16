#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod context;
mod helpers;
mod modules;
mod paths;
mod prefs;
mod theme;

use mimalloc::MiMalloc;
use tracing::{info, warn};

use crate::config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> eframe::Result {
    let data_dir = paths::app_data_dir();

    // Config is read before logging exists; report its problems afterwards.
    let (config, config_err) = match AppConfig::load(&data_dir) {
        Ok(c)  => (c, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    helpers::log::init_logging(&config.log_filter);
    if let Some(e) = config_err {
        warn!("[config] {e:#}; using defaults");
    }
    info!("[app] data dir {}", data_dir.display());

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("LiveWall")
            .with_inner_size([560.0, 700.0])
            .with_min_inner_size([420.0, 520.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        paths::APP_ID,
        native_options,
        Box::new(move |cc| Ok(Box::new(app::LiveWallApp::new(cc, &config, &data_dir)))),
    )
}
