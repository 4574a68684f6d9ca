use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatsWidget;

impl StatsWidget {
    /// Row of counted figures with their labels underneath
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        if app.stats.is_empty() || area.height == 0 {
            return;
        }

        let count = app.stats.len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
            .split(area);

        let separator = app.config.ui.thousands_separator;
        for (stat, column) in app.stats.iter().zip(columns.iter()) {
            let lines = vec![
                Line::from(Span::styled(
                    stat.display(now, separator),
                    Style::default()
                        .fg(app.theme.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    stat.label.as_str(),
                    Style::default().fg(app.theme.muted),
                )),
            ];
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .style(Style::default().bg(app.theme.bg));
            frame.render_widget(paragraph, *column);
        }
    }
}
