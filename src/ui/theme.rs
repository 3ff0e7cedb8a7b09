//! Color theme constants and palette generation for the wattscope UI.

use ratatui::style::Color;

// ============================================================================
// Base palette
// ============================================================================

/// Primary border color.
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color for highlights and headings.
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for less important info.
pub const COLOR_DIM: Color = Color::DarkGray;

/// Selected list row highlight.
pub const COLOR_SELECTION: Color = Color::Cyan;

/// Transient error notifications.
pub const COLOR_ERROR: Color = Color::Red;

/// Loading indicators.
pub const COLOR_LOADING: Color = Color::Gray;

// ============================================================================
// Freezing blue spectrum
// ============================================================================

/// Number of steps in a generated spectrum.
const SPECTRUM_STEPS: usize = 100;

/// Hue endpoints: cyan fading into a colder blue.
const SPECTRUM_START_HUE: f32 = 180.0;
const SPECTRUM_END_HUE: f32 = 220.0;

/// Default saturation ramp: moderate to stronger.
const SPECTRUM_INITIAL_SATURATION: f32 = 0.4;
const SPECTRUM_FINAL_SATURATION: f32 = 0.7;

/// Default lightness ramp: very light to moderate.
const SPECTRUM_INITIAL_LIGHTNESS: f32 = 0.85;
const SPECTRUM_FINAL_LIGHTNESS: f32 = 0.6;

/// Generate a 100-step cyan-to-cold-blue spectrum.
///
/// Low indices are light and washed out, high indices are saturated and
/// darker, so magnitudes read naturally when bars are colored by value.
pub fn generate_freezing_blue_spectrum(
    initial_saturation: f32,
    final_saturation: f32,
    initial_lightness: f32,
    final_lightness: f32,
) -> Vec<Color> {
    let steps = SPECTRUM_STEPS;
    let delta_hue = (SPECTRUM_END_HUE - SPECTRUM_START_HUE) / (steps - 1) as f32;
    let delta_saturation = (final_saturation - initial_saturation) / (steps - 1) as f32;
    let delta_lightness = (final_lightness - initial_lightness) / (steps - 1) as f32;

    (0..steps)
        .map(|i| {
            let hue = SPECTRUM_START_HUE + delta_hue * i as f32;
            let saturation = initial_saturation + delta_saturation * i as f32;
            let lightness = initial_lightness + delta_lightness * i as f32;
            hsl_to_color(hue, saturation, lightness)
        })
        .collect()
}

/// The spectrum with its default ramps.
pub fn freezing_blue_spectrum() -> Vec<Color> {
    generate_freezing_blue_spectrum(
        SPECTRUM_INITIAL_SATURATION,
        SPECTRUM_FINAL_SATURATION,
        SPECTRUM_INITIAL_LIGHTNESS,
        SPECTRUM_FINAL_LIGHTNESS,
    )
}

/// Pick the spectrum color for a value within `0.0..=max`.
pub fn spectrum_color_for(spectrum: &[Color], value: f64, max: f64) -> Color {
    if spectrum.is_empty() {
        return COLOR_ACCENT;
    }
    if max <= 0.0 {
        return spectrum[0];
    }
    let position = (value / max).clamp(0.0, 1.0);
    let index = (position * (spectrum.len() - 1) as f64).round() as usize;
    spectrum[index.min(spectrum.len() - 1)]
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to a
/// terminal RGB color.
fn hsl_to_color(hue: f32, saturation: f32, lightness: f32) -> Color {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let hue_prime = (hue.rem_euclid(360.0)) / 60.0;
    let x = chroma * (1.0 - (hue_prime.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match hue_prime as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::Rgb(to_byte(r1), to_byte(g1), to_byte(b1))
}
