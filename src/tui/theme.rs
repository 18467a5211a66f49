use ratatui::style::Color;

use crate::model::UiConfig;

use super::rows::FadeLevel;

/// Parsed color theme for the panel
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub border: Color,
    /// Placeholder circles, brightest to faintest
    pub fade_near: Color,
    pub fade_mid: Color,
    pub fade_far: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            border: Color::Rgb(0x5A, 0x52, 0x8F),
            fade_near: Color::Rgb(0x7D, 0x78, 0xBF),
            fade_mid: Color::Rgb(0x4E, 0x48, 0x7D),
            fade_far: Color::Rgb(0x2C, 0x25, 0x4A),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from `[ui.colors]`, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring unparseable color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "green" => theme.green = color,
                "selection_bg" => theme.selection_bg = color,
                "border" => theme.border = color,
                "fade_near" => theme.fade_near = color,
                "fade_mid" => theme.fade_mid = color,
                "fade_far" => theme.fade_far = color,
                _ => tracing::warn!(key = %key, "unknown color key"),
            }
        }

        theme
    }

    pub fn fade_color(&self, fade: FadeLevel) -> Color {
        match fade {
            FadeLevel::Near => self.fade_near,
            FadeLevel::Mid => self.fade_mid,
            FadeLevel::Far => self.fade_far,
        }
    }
}
