use std::time::Instant;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct ProgressWidget;

impl ProgressWidget {
    /// Thin bar showing how far the autoplay period has run
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let ratio = if app.carousel.is_autoplaying() {
            app.carousel.progress(now)
        } else {
            0.0
        };
        let (filled, empty) = split_width(area.width, ratio);

        let line = Line::from(vec![
            Span::styled("━".repeat(filled), Style::default().fg(app.theme.progress)),
            Span::styled("─".repeat(empty), Style::default().fg(app.theme.muted)),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(app.theme.bg)),
            area,
        );
    }
}

/// Filled and empty cell counts for a bar of `width` at `ratio`
fn split_width(width: u16, ratio: f64) -> (usize, usize) {
    let width = width as usize;
    let filled = ((width as f64) * ratio.clamp(0.0, 1.0)).round() as usize;
    (filled.min(width), width - filled.min(width))
}
