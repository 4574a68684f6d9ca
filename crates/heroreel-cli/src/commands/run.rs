use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use heroreel_core::AppConfig;
use heroreel_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    keymap::Keymap,
    widgets,
};

pub fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("heroreel"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state; the carousel starts counting from here
    let mut app = App::new(config.clone(), Instant::now());
    info!(
        "TUI started with {} slides, theme '{}'",
        config.slides.len(),
        config.ui.theme.name
    );

    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    let result = main_loop(&mut terminal, &mut app, &event_handler, &keymap);

    app.carousel.dispose();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("TUI stopped");
    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    keymap: &Keymap,
) -> Result<()> {
    loop {
        // Run timers that fell due while we were waiting
        app.tick(Instant::now());

        let now = Instant::now();
        terminal.draw(|frame| widgets::draw(frame, app, now))?;

        // Wakes on input, on the next carousel deadline, or after one tick
        if let Some(event) = event_handler.next(app.next_deadline())? {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.apply(action, now);
                }
                AppEvent::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, app);
                    app.apply(action, now);
                }
                // the next draw recomputes the layout
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => app.tick(now),
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
