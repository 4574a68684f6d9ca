mod hero;
mod indicators;
mod popup;
mod progress;
mod stats;
mod status_bar;

use std::time::Instant;

use ratatui::{style::Style, widgets::Block, Frame};

pub use hero::HeroWidget;
pub use indicators::IndicatorsWidget;
pub use popup::PopupWidget;
pub use progress::ProgressWidget;
pub use stats::StatsWidget;
pub use status_bar::StatusBarWidget;

use crate::app::{App, Mode};
use crate::layout::ScreenLayout;

/// Draw a full frame and record its layout for mouse hit-testing
pub fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg)), area);

    let dots = app.carousel.indicator_marks().map_or(0, |marks| marks.len());
    let layout = ScreenLayout::compute(area, dots, app.stats.len());

    HeroWidget::render(frame, layout.hero, app);
    IndicatorsWidget::render(frame, &layout.indicators, app);
    ProgressWidget::render(frame, layout.progress, app, now);
    StatsWidget::render(frame, layout.stats, app, now);
    StatusBarWidget::render(frame, layout.status, app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, app);
    }

    app.set_layout(layout, now);
}
