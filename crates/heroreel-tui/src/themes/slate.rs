//! Slate theme, corporate blue on grey

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg: Color::Rgb(0x1b, 0x1f, 0x27),
        status_bg: Color::Rgb(0x2a, 0x30, 0x3b),
        fg: Color::Rgb(0xe5, 0xe9, 0xf0),
        muted: Color::Rgb(0x8a, 0x93, 0xa3),
        accent: Color::Rgb(0x3b, 0x82, 0xf6),
        indicator: Color::Rgb(0x47, 0x50, 0x60),
        progress: Color::Rgb(0x60, 0xa5, 0xfa),
    }
}
