use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed chart colours
// ---------------------------------------------------------------------------

/// Map markers.
pub const MAP_POINT: Color32 = Color32::from_rgb(20, 175, 250);

/// Bar fills, used in rotation.
pub const BAR_FILLS: [Color32; 3] = [
    Color32::from_rgb(255, 255, 0),
    Color32::from_rgb(0, 128, 0),
    Color32::from_rgb(128, 0, 128),
];

/// Bar outline.
pub const BAR_EDGE: Color32 = Color32::from_rgb(0, 0, 255);

/// Area chart fill and line.
pub const AREA: Color32 = Color32::from_rgb(70, 130, 180);

pub fn bar_fill(index: usize) -> Color32 {
    BAR_FILLS[index % BAR_FILLS.len()]
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
