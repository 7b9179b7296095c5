//! Colors, themes and metrics.
//!
//! Colors are four normalized `f32` channels. Themes and metrics are plain
//! data deserialized from the `[theme]` and `[metrics]` tables of a
//! [`GuiConfig`](crate::config::GuiConfig).

use serde::Deserialize;

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Creates a color from byte channels.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(
            f32::from(bytes[0]) / 255.0,
            f32::from(bytes[1]) / 255.0,
            f32::from(bytes[2]) / 255.0,
            f32::from(bytes[3]) / 255.0,
        )
    }

    /// Converts to byte channels, clamping out-of-range components.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_bytes(self) -> [u8; 4] {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [byte(self.r), byte(self.g), byte(self.b), byte(self.a)]
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Linearly interpolates between two colors, per channel.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Accepted spellings of a color in configuration files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgba([f32; 4]),
    Rgb([f32; 3]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Rgba([r, g, b, a]) => Ok(Self::rgba(r, g, b, a)),
            ColorRepr::Rgb([r, g, b]) => Ok(Self::rgb(r, g, b)),
            ColorRepr::Hex(text) => parse_hex(&text),
        }
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA`.
fn parse_hex(text: &str) -> Result<Color, String> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    let value = u32::from_str_radix(digits, 16)
        .map_err(|_| format!("`{text}` is not a hex color"))?;
    match digits.len() {
        6 => Ok(Color::hex((value << 8) | 0xFF)),
        8 => Ok(Color::hex(value)),
        _ => Err(format!("`{text}` must be #RRGGBB or #RRGGBBAA")),
    }
}

/// Complete color theme for the widget library.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Container and scroll viewport background.
    pub background: Color,
    /// Widget face (buttons, fields, headers).
    pub surface: Color,
    /// Widget face under the pointer.
    pub surface_hover: Color,
    /// Widget face while captured.
    pub surface_active: Color,
    /// Outline color.
    pub border: Color,
    /// Outline of the focused widget.
    pub border_focus: Color,
    /// Text color.
    pub text: Color,
    /// Muted text (separators, placeholders).
    pub text_muted: Color,
    /// Accent (slider fill, toggle mark, selected rows).
    pub accent: Color,
    /// Text selection highlight.
    pub selection: Color,
    /// Text caret.
    pub caret: Color,
    /// Popup background.
    pub popup: Color,
    /// Scrollbar track.
    pub scroll_track: Color,
    /// Scrollbar thumb.
    pub scroll_thumb: Color,
}

impl Theme {
    /// Dark theme.
    pub const DARK: Self = Self {
        background: Color::rgba(0.10, 0.10, 0.12, 1.0),
        surface: Color::rgba(0.20, 0.20, 0.24, 1.0),
        surface_hover: Color::rgba(0.27, 0.27, 0.32, 1.0),
        surface_active: Color::rgba(0.14, 0.14, 0.17, 1.0),
        border: Color::rgba(0.35, 0.35, 0.40, 1.0),
        border_focus: Color::rgba(0.30, 0.60, 1.00, 1.0),
        text: Color::rgba(0.92, 0.92, 0.92, 1.0),
        text_muted: Color::rgba(0.55, 0.55, 0.58, 1.0),
        accent: Color::rgba(0.25, 0.55, 0.95, 1.0),
        selection: Color::rgba(0.25, 0.45, 0.85, 0.6),
        caret: Color::rgba(0.95, 0.95, 0.95, 1.0),
        popup: Color::rgba(0.16, 0.16, 0.19, 1.0),
        scroll_track: Color::rgba(0.12, 0.12, 0.14, 1.0),
        scroll_thumb: Color::rgba(0.40, 0.40, 0.45, 1.0),
    };

    /// Light theme.
    pub const LIGHT: Self = Self {
        background: Color::rgba(0.95, 0.95, 0.96, 1.0),
        surface: Color::rgba(0.86, 0.86, 0.88, 1.0),
        surface_hover: Color::rgba(0.80, 0.80, 0.84, 1.0),
        surface_active: Color::rgba(0.72, 0.72, 0.76, 1.0),
        border: Color::rgba(0.55, 0.55, 0.60, 1.0),
        border_focus: Color::rgba(0.15, 0.45, 0.90, 1.0),
        text: Color::rgba(0.08, 0.08, 0.10, 1.0),
        text_muted: Color::rgba(0.45, 0.45, 0.48, 1.0),
        accent: Color::rgba(0.15, 0.45, 0.90, 1.0),
        selection: Color::rgba(0.45, 0.65, 1.00, 0.5),
        caret: Color::rgba(0.05, 0.05, 0.05, 1.0),
        popup: Color::rgba(0.98, 0.98, 0.99, 1.0),
        scroll_track: Color::rgba(0.88, 0.88, 0.90, 1.0),
        scroll_thumb: Color::rgba(0.60, 0.60, 0.65, 1.0),
    };
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}

/// Sizes and timings used by the widget library.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Inner padding between a widget's edge and its label.
    pub padding: f32,
    /// Width of scrollbar tracks.
    pub scrollbar_width: f32,
    /// Smallest scrollbar thumb length.
    pub min_thumb: f32,
    /// Content pixels scrolled per wheel notch.
    pub wheel_step: f32,
    /// Full caret blink period in milliseconds (on for half of it).
    pub caret_blink_ms: u64,
    /// Glyph drawn in place of every character of a password field.
    pub password_glyph: char,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            padding: 4.0,
            scrollbar_width: 10.0,
            min_thumb: 12.0,
            wheel_step: 20.0,
            caret_blink_ms: 1000,
            password_glyph: '*',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp() {
        let black = Color::BLACK;
        let white = Color::WHITE;
        let mid = black.lerp(white, 0.5);

        assert!((mid.r - 0.5).abs() < 0.01);
        assert!((mid.g - 0.5).abs() < 0.01);
        assert!((mid.b - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_color_hex() {
        let color = Color::hex(0xFF00_00FF);
        assert!((color.r - 1.0).abs() < 0.01);
        assert!((color.g - 0.0).abs() < 0.01);
        assert!((color.b - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_byte_conversion_clamps() {
        let bytes = Color::rgba(1.5, -0.2, 0.5, 1.0).to_bytes();
        assert_eq!(bytes, [255, 0, 128, 255]);
        assert_eq!(Color::from_bytes([255, 0, 0, 255]), Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_hex("#00ff00").unwrap(), Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(parse_hex("#00000000").unwrap(), Color::TRANSPARENT);
        assert!(parse_hex("#abc").is_err());
        assert!(parse_hex("#zzzzzz").is_err());
    }
}
