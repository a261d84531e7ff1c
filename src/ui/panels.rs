use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, Tab};
use crate::ui::table;

// ---------------------------------------------------------------------------
// Left side panel – page selector and city picker
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Directory");
    egui::ComboBox::from_label("Select a tab")
        .selected_text(tab_label(state.tab))
        .show_ui(ui, |ui: &mut Ui| {
            for tab in [Tab::Map, Tab::Chart] {
                ui.selectable_value(&mut state.tab, tab, tab_label(tab));
            }
        });
    ui.separator();

    if state.tab == Tab::Map {
        city_steps(ui, state);
    }
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Map => "Map",
        Tab::Chart => "Chart",
    }
}

/// The three numbered steps that lead to the crawl table.
fn city_steps(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Follow the steps below to look at pubs in England");
    ui.separator();

    ui.label("1.   Select a city, or type to find city");
    ui.text_edit_singleline(&mut state.city_search);

    let current = state.city.clone().unwrap_or_default();
    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("city_select")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for authority in state.matching_authorities(&state.city_search) {
                if ui
                    .selectable_label(current == *authority, authority.as_str())
                    .clicked()
                {
                    chosen = Some(authority.clone());
                }
            }
        });
    if let Some(city) = chosen {
        state.set_city(city);
    }
    ui.separator();

    ui.label("2.   Click the button below to view pubs in chosen city");
    ui.separator();

    if ui.button("3.   Click to view pubs in city").clicked() {
        state.show_crawl();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let can_export = !state.crawl.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export crawl table…"))
                .clicked()
            {
                table::export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(ds) = state.dataset {
            ui.label(format!(
                "{} pubs loaded, {} local authorities",
                ds.len(),
                state.authorities.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Full-window message shown instead of the pages when loading failed.
pub fn load_error_panel(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(
            RichText::new(format!("Unable to show the pubs dashboard.\n\n{message}"))
                .color(Color32::RED)
                .heading(),
        );
    });
}
