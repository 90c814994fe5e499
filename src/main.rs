#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod ui;

use eframe::egui;
use stretch_planner::config::Config;
use stretch_planner::logging;

fn main() -> eframe::Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Using default config: {:#}", e);
        Config::default()
    });

    // Handle must outlive the event loop
    let logger = Config::log_dir().and_then(|dir| logging::init_logging(&config.log_level, &dir));
    let _logger = match logger {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Logging disabled: {:#}", e);
            None
        }
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 860.0])
        .with_min_inner_size([900.0, 600.0])
        .with_title("Stretch Planner");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Stretch Planner",
        options,
        Box::new(move |cc| Ok(Box::new(ui::PlannerApp::new(cc, config)))),
    )
}
