//! Forest theme, green accents on a near-black background

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg: Color::Rgb(0x12, 0x17, 0x14),
        status_bg: Color::Rgb(0x1f, 0x2a, 0x23),
        fg: Color::Rgb(0xe8, 0xef, 0xe9),
        muted: Color::Rgb(0x7d, 0x8c, 0x82),
        accent: Color::Rgb(0x22, 0x92, 0x3f),
        indicator: Color::Rgb(0x3f, 0x4d, 0x44),
        progress: Color::Rgb(0x5c, 0xc2, 0x76),
    }
}
