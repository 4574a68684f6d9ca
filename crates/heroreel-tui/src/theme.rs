use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg: Color,
    pub status_bg: Color,

    // Foreground colors
    pub fg: Color,
    pub muted: Color,

    // Carousel colors
    pub accent: Color,
    pub indicator: Color,
    pub progress: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::default_theme()
    }
}
