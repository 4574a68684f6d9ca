use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    PrevSlide,
    NextSlide,
    /// Jump to a slide by zero-based index (digit keys, indicator clicks)
    JumpTo(usize),
    /// Pause or resume autoplay
    ToggleAutoplay,
    ShowHelp,
    ExitMode,
    /// Primary button pressed inside the hero
    PointerDown { column: u16, row: u16 },
    /// Primary button released
    PointerUp { column: u16, row: u16 },
    /// Pointer moved without buttons held
    PointerMoved { column: u16, row: u16 },
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Any key leaves the help popup
    if app.mode == Mode::Help {
        return Action::ExitMode;
    }

    // Digits jump straight to a slide, like clicking its indicator
    if let (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) = (key.code, key.modifiers) {
        let index = (c as u8 - b'1') as usize;
        return Action::JumpTo(index);
    }

    keymap
        .get(&KeyBinding::from_event(&key))
        .copied()
        .unwrap_or(Action::None)
}

/// Handle a mouse event and return the corresponding action
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> Action {
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.layout.indicator_at(column, row) {
                Action::JumpTo(index)
            } else if app.layout.in_hero(column, row) {
                Action::PointerDown { column, row }
            } else {
                Action::None
            }
        }
        MouseEventKind::Up(MouseButton::Left) => Action::PointerUp { column, row },
        MouseEventKind::Moved => Action::PointerMoved { column, row },
        _ => Action::None,
    }
}
