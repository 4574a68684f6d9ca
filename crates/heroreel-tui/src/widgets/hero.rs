use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

pub struct HeroWidget;

impl HeroWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        // Slides fade in; dim the text while the transition lock is held
        let transitioning = app.carousel.is_transitioning();
        let (title_color, body_color) = if transitioning {
            (theme.muted, theme.muted)
        } else {
            (theme.fg, theme.fg)
        };

        let counter = match app.carousel.current() {
            Some(index) => format!(" {}/{} ", index + 1, app.carousel.len()),
            None => String::new(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if app.hovering { theme.accent } else { theme.muted }))
            .title_bottom(Line::from(counter).right_aligned())
            .style(Style::default().bg(theme.bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(slide) = app.current_slide() else {
            let empty = Paragraph::new("No slides configured")
                .style(Style::default().fg(theme.muted))
                .alignment(Alignment::Center);
            frame.render_widget(empty, center_rows(inner, 1));
            return;
        };

        let width = inner.width.saturating_sub(4).max(1) as usize;
        let mut lines: Vec<Line> = Vec::new();

        for text in wrap_words(&slide.title, width) {
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            )));
        }

        if !slide.subtitle.is_empty() {
            lines.push(Line::from(""));
            for text in wrap_words(&slide.subtitle, width) {
                lines.push(Line::from(Span::styled(text, Style::default().fg(body_color))));
            }
        }

        if let Some(ref cta) = slide.cta {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {} ", cta),
                Style::default()
                    .fg(theme.bg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        let height = lines.len() as u16;
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, center_rows(inner, height));
    }
}

/// Vertically center `height` rows inside `area`
fn center_rows(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height - height) / 2;
    Rect::new(area.x, y, area.width, height)
}

/// Wrap on word boundaries by display width; overlong words are split
fn wrap_words(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if line_width > 0 && line_width + 1 + word_width > max_width {
            result.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width > max_width {
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(1);
                if line_width + ch_width > max_width && !line.is_empty() {
                    result.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(ch);
                line_width += ch_width;
            }
            continue;
        }

        if line_width > 0 {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }

    if !line.is_empty() {
        result.push(line);
    }
    result
}
