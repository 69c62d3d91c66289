//! Key mapping from terminal events to controller actions.
//!
//! The console controller has a d-pad, two rotate buttons, Start and Select;
//! the keyboard layout below mirrors it.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a controller action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if is_quit(key) {
        return Some(Action::Quit);
    }

    match key.code {
        // D-pad
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Action::Down),
        KeyCode::Up | KeyCode::Char(' ') => Some(Action::Up),

        // Rotate buttons
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(Action::RotateCw)
        }
        KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('y') | KeyCode::Char('Y') => {
            Some(Action::RotateCcw)
        }

        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Start),
        KeyCode::Backspace | KeyCode::Tab => Some(Action::Select),

        _ => None,
    }
}

/// Check if key should shut the console down.
pub fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
