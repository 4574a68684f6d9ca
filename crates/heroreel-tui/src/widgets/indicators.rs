use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct IndicatorsWidget;

impl IndicatorsWidget {
    /// Draw one dot per rect; the active slide's dot is filled
    pub fn render(frame: &mut Frame, dots: &[Rect], app: &App) {
        let Some(marks) = app.carousel.indicator_marks() else {
            return;
        };

        for (rect, active) in dots.iter().zip(marks) {
            let (symbol, style) = if *active {
                (
                    "●",
                    Style::default()
                        .fg(app.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("○", Style::default().fg(app.theme.indicator))
            };
            let dot = Paragraph::new(symbol)
                .style(style.bg(app.theme.bg))
                .alignment(Alignment::Center);
            frame.render_widget(dot, *rect);
        }
    }
}
