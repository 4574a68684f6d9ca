use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(" {} | {}", mode_label(app), slide_label(app)),
        };

        let keys = &app.config.keymap;
        let help_hint = format!(
            " {}:quit {}/{}:slide {}:autoplay {}:help ",
            keys.quit, keys.prev_slide, keys.next_slide, keys.toggle_autoplay, keys.help
        );

        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg).bg(theme.status_bg)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.status_bg)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.status_bg)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn mode_label(app: &App) -> &'static str {
    match app.mode {
        Mode::Help => "HELP",
        Mode::Normal if app.carousel.is_inert() => "EMPTY",
        Mode::Normal if app.user_paused => "PAUSED",
        Mode::Normal if app.hovering => "HOLD",
        Mode::Normal => "PLAYING",
    }
}

fn slide_label(app: &App) -> String {
    match app.carousel.current() {
        Some(index) => format!("Slide {}/{}", index + 1, app.carousel.len()),
        None => "No slides".to_string(),
    }
}
