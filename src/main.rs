mod app;
mod color;
mod config;
mod data;
mod selection;
mod state;
mod ui;

use app::NameTrendsApp;
use clap::Parser;
use config::{Cli, ViewConfig};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let mut app = NameTrendsApp::new(ViewConfig::from(&cli));
    if let Some(path) = &cli.dataset {
        app.state.open_path(path);
    }

    eframe::run_native(
        "Name Trends – Baby Name Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
