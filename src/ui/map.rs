use eframe::egui::{self, Ui};
use egui_plot::{Plot, PlotPoint, PlotPoints, Points};

use crate::color::MAP_POINT;
use crate::config;
use crate::state::AppState;

/// Half-width / half-height of the initial view around the mean position, in degrees.
const VIEW_HALF_SPAN: [f64; 2] = [4.0, 3.0];

// ---------------------------------------------------------------------------
// Map page
// ---------------------------------------------------------------------------

/// Render the map page in the central panel.
pub fn map_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Pubs in England");
    ui.label(egui::RichText::new("Hopefully you are thirsty!").italics());

    if let Some(banner) = &state.banner {
        let uri = format!("file://{}", banner.display());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(egui::Image::new(uri).max_width(500.0).max_height(300.0));
        });
    }

    ui.label(
        "This is an interactive website created for users to view and analyze all of the pubs in England",
    );
    ui.add_space(6.0);

    let sizes = config::point_sizes();
    egui::ComboBox::from_label("Toggle point size")
        .selected_text(state.point_size.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for size in sizes {
                ui.selectable_value(&mut state.point_size, size, size.to_string());
            }
        });

    if state.point_size > 0 {
        ui.label("View a map of the pubs:");
        pub_map(ui, state);
    }
}

/// Scatter map of every pub; hovering names the nearest one.
fn pub_map(ui: &mut Ui, state: &AppState) {
    let Some([lon, lat]) = state.map_center else {
        ui.label("No pubs with coordinates to show.");
        return;
    };

    let points = &state.map_points;
    let plotted: PlotPoints = points.iter().map(|&(_, x, y)| [x, y]).collect();

    Plot::new("pub_map")
        .height(ui.available_height().clamp(320.0, 640.0))
        .data_aspect(map_aspect(lat))
        .include_x(lon - VIEW_HALF_SPAN[0])
        .include_x(lon + VIEW_HALF_SPAN[0])
        .include_y(lat - VIEW_HALF_SPAN[1])
        .include_y(lat + VIEW_HALF_SPAN[1])
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(|name, value| {
            if name.is_empty() {
                return String::new();
            }
            match nearest_pub(points, value) {
                Some(pub_name) => format!("Listing:\n{pub_name}"),
                None => String::new(),
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(plotted)
                    .name("Pubs")
                    .color(MAP_POINT)
                    .radius(point_radius(state.point_size)),
            );
        });
}

/// On-screen marker radius (pixels) for a size given in metres.
pub fn point_radius(size_m: u32) -> f32 {
    size_m as f32 / 500.0
}

/// Longitude units per latitude unit at `lat`, so the map is not stretched.
pub fn map_aspect(lat: f64) -> f32 {
    let shrink = lat.to_radians().cos().abs().max(0.1);
    (1.0 / shrink) as f32
}

/// Name of the pub closest to `at` (planar distance in degrees).
pub fn nearest_pub<'a>(points: &[(&'a str, f64, f64)], at: &PlotPoint) -> Option<&'a str> {
    points
        .iter()
        .map(|&(name, x, y)| (name, (x - at.x).powi(2) + (y - at.y).powi(2)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}
