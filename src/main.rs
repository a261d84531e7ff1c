mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::PubsApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let cfg = DashboardConfig::from_env();
    log::info!("Starting with {cfg:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Pubs in England")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pubs in England",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the banner from disk.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PubsApp::new(&cfg)))
        }),
    )
}
