use eframe::egui;

use crate::config::DashboardConfig;
use crate::data::cache;
use crate::state::{AppState, Tab};
use crate::ui::{charts, map, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PubsApp {
    pub state: AppState,
}

impl PubsApp {
    /// Build the state and load the dataset once.
    pub fn new(cfg: &DashboardConfig) -> Self {
        let mut state = AppState::new(cfg);
        if state.banner.is_none() {
            log::warn!("Banner image {} not found, skipping it", cfg.banner_path.display());
        }

        match cache::load() {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => state.set_load_error(&e),
        }
        Self { state }
    }
}

impl eframe::App for PubsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(msg) = &self.state.load_error {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::load_error_panel(ui, msg);
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: directory ----
        egui::SidePanel::left("directory_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected page ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Map => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        map::map_page(ui, &mut self.state);
                        ui.separator();
                        table::crawl_table(ui, &mut self.state);
                    });
            }
            Tab::Chart => charts::chart_page(ui, &mut self.state),
        });
    }
}
