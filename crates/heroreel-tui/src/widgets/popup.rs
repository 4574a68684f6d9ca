use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::layout::centered_rect;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;

        let rows = [
            (format!("{} / <Left>", keys.prev_slide), "Previous slide"),
            (format!("{} / <Right>", keys.next_slide), "Next slide"),
            ("1-9".to_string(), "Jump to slide"),
            (keys.toggle_autoplay.clone(), "Pause or resume autoplay"),
            ("drag".to_string(), "Swipe between slides"),
            (keys.help.clone(), "This help"),
            (format!("{} / <C-c>", keys.quit), "Quit"),
        ];

        let popup_area = centered_rect(46, rows.len() as u16 + 4, frame.area());
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.status_bg));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let mut lines: Vec<Line> = rows
            .into_iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:<14}", key),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(what, Style::default().fg(theme.fg)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled("press any key", Style::default().fg(theme.muted)))
                .centered(),
        );

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
