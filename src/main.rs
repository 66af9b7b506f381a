//! Faculty Viz - Arts Faculty Survey Analysis & Interactive Dashboard
//!
//! Loads the arts-faculty survey CSV from a URL or local file and renders
//! descriptive charts (pie, bar, histogram, scatter) in a desktop dashboard.

mod analysis;
mod charts;
mod config;
mod data;
mod export;
mod gui;

use eframe::egui;
use gui::FacultyVizApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Faculty Viz"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Faculty Viz",
        options,
        Box::new(|cc| Ok(Box::new(FacultyVizApp::new(cc)))),
    )
}
