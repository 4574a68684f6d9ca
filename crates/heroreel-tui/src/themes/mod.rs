//! Theme registry and loader

mod forest;
mod nord;
mod slate;

use heroreel_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Theme;

/// Theme used when nothing is configured
pub fn default_theme() -> Theme {
    forest::default()
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "forest" => forest::default(),
        "slate" => slate::default(),
        "nord" => nord::default(),
        other => {
            warn!("Unknown theme '{}', falling back to forest", other);
            forest::default()
        }
    };

    apply_overrides(base, &config.colors)
}

fn override_color(slot: &mut Color, hex: &Option<String>) {
    if let Some(ref hex) = hex {
        match parse_hex_color(hex) {
            Some(color) => *slot = color,
            None => warn!("Ignoring invalid color override '{}'", hex),
        }
    }
}

/// Apply user color overrides to a base theme
fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    override_color(&mut theme.bg, &overrides.bg);
    override_color(&mut theme.fg, &overrides.fg);
    override_color(&mut theme.muted, &overrides.muted);
    override_color(&mut theme.accent, &overrides.accent);
    override_color(&mut theme.indicator, &overrides.indicator);
    override_color(&mut theme.progress, &overrides.progress);
    override_color(&mut theme.status_bg, &overrides.status_bg);
    theme
}

/// Get list of available theme names
pub fn available_themes() -> Vec<&'static str> {
    vec!["forest", "slate", "nord"]
}
