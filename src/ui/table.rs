use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::export_records;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Crawl table – all pubs of the chosen city
// ---------------------------------------------------------------------------

pub fn crawl_table(ui: &mut Ui, state: &mut AppState) {
    let (Some(ds), Some(city)) = (state.dataset, state.crawl_city.clone()) else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Your selected pubs are shown below:");
        ui.label(format!("{} in {city}", state.crawl.len()));
        if ui.button("Export…").clicked() {
            export_dialog(state);
        }
        if ui.button("Hide").clicked() {
            state.hide_crawl();
        }
    });

    let rows = &state.crawl;
    let n_cols = ds.columns.len() + 1;

    egui::ScrollArea::horizontal()
        .id_salt("crawl_table_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .id_salt("crawl_table")
                .striped(true)
                .resizable(true)
                .columns(Column::auto().at_least(60.0).clip(true), n_cols)
                .header(20.0, |mut header| {
                    for col in std::iter::once(&ds.id_column).chain(&ds.columns) {
                        header.col(|ui: &mut Ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, rows.len(), |mut row| {
                        let record = rows[row.index()];
                        row.col(|ui: &mut Ui| {
                            ui.label(&record.id);
                        });
                        for cell in &record.fields {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let Some(ds) = state.dataset else {
        return;
    };
    if state.crawl.is_empty() {
        state.status_message = Some("Nothing to export: show a city's pubs first".to_string());
        return;
    }

    let default_name = format!(
        "{}.csv",
        state.crawl_city.as_deref().unwrap_or("pubs").replace(' ', "_")
    );
    let file = rfd::FileDialog::new()
        .set_title("Export pub crawl")
        .set_file_name(default_name)
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match export_records(&path, ds, &state.crawl) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
