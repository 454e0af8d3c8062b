use egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color-blind friendly palette (Okabe–Ito)
// ---------------------------------------------------------------------------

/// Color-blind friendly color values for plots and figures.
pub struct ColorPalette;

impl ColorPalette {
    pub const BLACK: Color32 = Color32::from_rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);
    pub const LIGHT_GREY: Color32 = Color32::from_rgb(0xF0, 0xF0, 0xF0);
    pub const YELLOW: Color32 = Color32::from_rgb(0xE6, 0x9F, 0x00);
    pub const LIGHT_BLUE: Color32 = Color32::from_rgb(0x56, 0xB4, 0xE9);
    pub const GREEN: Color32 = Color32::from_rgb(0x00, 0x9E, 0x73);
    pub const BRIGHT_YELLOW: Color32 = Color32::from_rgb(0xF0, 0xE4, 0x42);
    pub const DARK_BLUE: Color32 = Color32::from_rgb(0x00, 0x72, 0xB2);
    pub const VERMILLION: Color32 = Color32::from_rgb(0xD5, 0x5E, 0x00);
    pub const PINK: Color32 = Color32::from_rgb(0xCC, 0x79, 0xA7);

    /// The categorical cycle used for multi-series plots, ordered for
    /// contrast between neighbouring series.
    pub fn categorical() -> Vec<Color32> {
        vec![
            Self::DARK_BLUE,
            Self::VERMILLION,
            Self::GREEN,
            Self::YELLOW,
            Self::PINK,
            Self::LIGHT_BLUE,
            Self::BRIGHT_YELLOW,
            Self::BLACK,
        ]
    }
}

// ---------------------------------------------------------------------------
// Procedural palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used as a fallback when a plot has more series than the fixed
/// categorical palette.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}
