use std::f64::consts::TAU;

use eframe::egui::{self, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color::{self, AREA, BAR_EDGE};
use crate::config;
use crate::state::AppState;

/// How far the largest pie slice is pulled out, as a fraction of the radius.
pub const EXPLODE: f64 = 0.3;

/// Arc resolution of a full pie.
const PIE_SEGMENTS: usize = 180;

// ---------------------------------------------------------------------------
// Chart page
// ---------------------------------------------------------------------------

/// Render the chart page in the central panel.
pub fn chart_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Pub frequency Analyzer");

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Bar Chart");
            let mut n = state.top_n;
            let slider = egui::Slider::new(&mut n, 0..=config::MAX_TOP_NAMES)
                .text("Pick a number on the slider to display a bar chart");
            if ui.add(slider).changed() {
                state.set_top_n(n);
            }
            ui.label(format!("You are viewing the top {} pub names", state.top_n));
            if state.top_n > 0 {
                names_bar_chart(ui, &state.top_names);
            }
            ui.separator();

            ui.strong("Pie Chart");
            ui.label("Choose Local Authorities to see pub frequencies:");
            authority_multiselect(ui, state);
            if !state.picked.is_empty() {
                pie_chart(ui, &state.picked_counts, &state.picked);
            }
            ui.separator();

            ui.strong("Area Chart");
            ui.checkbox(&mut state.show_area_chart, "Click to show Area Chart");
            if state.show_area_chart {
                area_chart(ui, &state.area_counts);
            }
        });
}

/// Searchable checkbox list standing in for a multi-select box.
fn authority_multiselect(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select a Local Authority:");
        ui.text_edit_singleline(&mut state.authority_search);
        if ui.small_button("Clear").clicked() {
            state.clear_picked();
        }
    });

    if !state.picked.is_empty() {
        ui.label(format!("Selected: {}", state.picked.join(", ")));
    }

    let mut toggled: Option<String> = None;
    egui::ScrollArea::vertical()
        .id_salt("authority_multiselect")
        .max_height(150.0)
        .show(ui, |ui: &mut Ui| {
            for authority in state.matching_authorities(&state.authority_search) {
                let mut checked = state.picked.contains(authority);
                if ui.checkbox(&mut checked, authority.as_str()).changed() {
                    toggled = Some(authority.clone());
                }
            }
        });

    if let Some(authority) = toggled {
        state.toggle_authority(&authority);
    }
}

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

fn names_bar_chart(ui: &mut Ui, top: &[(String, usize)]) {
    let bars: Vec<Bar> = top
        .iter()
        .enumerate()
        .map(|(i, (name, count))| {
            Bar::new(i as f64, *count as f64)
                .name(name)
                .width(0.8)
                .fill(color::bar_fill(i))
                .stroke(Stroke::new(1.0, BAR_EDGE))
        })
        .collect();

    let labels: Vec<String> = top.iter().map(|(name, _)| name.clone()).collect();

    ui.label("Popular Pubs and Their Frequency");
    Plot::new("names_bar_chart")
        .height(320.0)
        .x_axis_label("Pubs")
        .y_axis_label("Frequency")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Label for an axis mark that sits exactly on a category index.
fn index_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// One wedge of the pie, angles in radians counter-clockwise from +x.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub fraction: f64,
    pub start: f64,
    pub end: f64,
    /// Distance the wedge is pulled away from the centre.
    pub offset: f64,
}

impl PieSlice {
    fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Closed outline: centre, then the arc from `start` to `end`.
    pub fn outline(&self) -> Vec<[f64; 2]> {
        let (cx, cy) = (
            self.offset * self.mid_angle().cos(),
            self.offset * self.mid_angle().sin(),
        );
        let steps = ((PIE_SEGMENTS as f64 * self.fraction).ceil() as usize).max(2);
        let mut points = Vec::with_capacity(steps + 2);
        points.push([cx, cy]);
        for k in 0..=steps {
            let angle = self.start + (self.end - self.start) * k as f64 / steps as f64;
            points.push([cx + angle.cos(), cy + angle.sin()]);
        }
        points
    }

    /// Where the wedge's label goes: along the mid angle, inside the wedge.
    pub fn label_anchor(&self) -> [f64; 2] {
        let r = self.offset + 0.6;
        [r * self.mid_angle().cos(), r * self.mid_angle().sin()]
    }
}

/// Split a unit pie among `amounts`; the largest (first on ties) is exploded.
///
/// Returns nothing when every amount is zero.
pub fn pie_slices(amounts: &[usize]) -> Vec<PieSlice> {
    let total: usize = amounts.iter().sum();
    if total == 0 {
        return Vec::new();
    }
    let max = amounts.iter().copied().max().unwrap_or(0);
    let exploded = amounts.iter().position(|&a| a == max);

    let mut start = 0.0;
    amounts
        .iter()
        .enumerate()
        .map(|(i, &amount)| {
            let fraction = amount as f64 / total as f64;
            let end = start + fraction * TAU;
            let slice = PieSlice {
                fraction,
                start,
                end,
                offset: if Some(i) == exploded { EXPLODE } else { 0.0 },
            };
            start = end;
            slice
        })
        .collect()
}

fn pie_chart(ui: &mut Ui, amounts: &[usize], labels: &[String]) {
    let slices = pie_slices(amounts);
    let colours = color::generate_palette(slices.len());

    ui.label(format!("Pub Frequency {}", labels.join(", ")));
    Plot::new("authority_pie_chart")
        .height(360.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for ((slice, label), colour) in slices.iter().zip(labels).zip(colours) {
                if slice.fraction == 0.0 {
                    continue;
                }
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(slice.outline()))
                        .name(label)
                        .fill_color(colour)
                        .stroke(Stroke::new(1.0, colour)),
                );
                let [x, y] = slice.label_anchor();
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    format!("{:.5}", slice.fraction * 100.0),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Area chart
// ---------------------------------------------------------------------------

fn area_chart(ui: &mut Ui, counts: &[(String, usize)]) {
    let points: PlotPoints = counts
        .iter()
        .enumerate()
        .map(|(i, (_, count))| [i as f64, *count as f64])
        .collect();
    let labels: Vec<String> = counts.iter().map(|(a, _)| a.clone()).collect();

    Plot::new("authority_area_chart")
        .height(320.0)
        .x_axis_label("Local authority")
        .y_axis_label("Pubs")
        .x_axis_formatter(move |mark, _range| index_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Pubs").color(AREA).fill(0.0));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_full_circle() {
        let slices = pie_slices(&[3, 1, 4]);
        assert_eq!(slices.len(), 3);
        let total: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(slices[0].start, 0.0);
        assert!((slices[2].end - TAU).abs() < 1e-12);
        assert!((slices[1].start - slices[0].end).abs() < 1e-12);
    }

    #[test]
    fn only_first_largest_slice_is_exploded() {
        let slices = pie_slices(&[2, 5, 5]);
        let offsets: Vec<f64> = slices.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, EXPLODE, 0.0]);
    }

    #[test]
    fn empty_or_zero_amounts_give_no_slices() {
        assert!(pie_slices(&[]).is_empty());
        assert!(pie_slices(&[0, 0]).is_empty());
    }

    #[test]
    fn outline_starts_at_offset_centre() {
        let slices = pie_slices(&[1]);
        let slice = &slices[0];
        let outline = slice.outline();
        let mid = slice.mid_angle();
        assert_eq!(outline[0], [slice.offset * mid.cos(), slice.offset * mid.sin()]);
        assert!(outline.len() >= 4);
    }

    #[test]
    fn axis_labels_only_on_whole_indices() {
        let labels = vec!["Crown".to_string(), "Swan".to_string()];
        assert_eq!(index_label(&labels, 1.0), "Swan");
        assert_eq!(index_label(&labels, 0.5), "");
        assert_eq!(index_label(&labels, 2.0), "");
        assert_eq!(index_label(&labels, -1.0), "");
    }
}
