// Theme module - UI palette and connection status colors
//
// Chrome colors (borders, titles, text) live here. Status colors, the ones
// that paint bubbles and legend swatches, live in `status`.

pub mod status;

use ratatui::style::Color;

pub use status::{status_color, DEFAULT_STATUS_COLOR};

/// Primary accent - borders, titles
/// RGB: (122, 162, 247)
pub const ACCENT_BLUE: Color = Color::Rgb(122, 162, 247);

/// Regular text
/// RGB: (192, 202, 245)
pub const TEXT_WHITE: Color = Color::Rgb(192, 202, 245);

/// Secondary text, hints, inactive rows
/// RGB: (86, 95, 137)
pub const MUTED_GRAY: Color = Color::Rgb(86, 95, 137);

/// Highlight for toggles that are on
/// RGB: (158, 206, 106)
pub const ACTIVE_GREEN: Color = Color::Rgb(158, 206, 106);

/// Stale data / attention
/// RGB: (255, 158, 100)
pub const WARN_ORANGE: Color = Color::Rgb(255, 158, 100);

/// Viewport background
pub const VOID_BLACK: Color = Color::Rgb(0, 0, 0);

/// Interpolate between two RGB colors based on a ratio (0.0 ~ 1.0)
pub fn interpolate_color(color1: (u8, u8, u8), color2: (u8, u8, u8), ratio: f32) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let r = (color1.0 as f32 + (color2.0 as f32 - color1.0 as f32) * ratio) as u8;
    let g = (color1.1 as f32 + (color2.1 as f32 - color1.1 as f32) * ratio) as u8;
    let b = (color1.2 as f32 + (color2.2 as f32 - color1.2 as f32) * ratio) as u8;
    Color::Rgb(r, g, b)
}

/// Darken a color towards black by `amount` (0.0 = unchanged, 1.0 = black).
/// Non-RGB colors are returned unchanged.
pub fn dim(color: Color, amount: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => interpolate_color((r, g, b), (0, 0, 0), amount),
        other => other,
    }
}
