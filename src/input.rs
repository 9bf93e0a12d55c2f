use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::Rotation;
use crate::game::Shift;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Move(Shift),
    SoftDrop,
    Rotate(Rotation),
    HardDrop,
    /// The start / pause / resume / restart control.
    ToggleStart,
    ToggleGrid,
    Quit,
}

/// Translates a key press into an action. Releases and repeats are dropped.
///
/// Space only ever hard-drops; it never reaches the start/pause control.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Left => Some(Action::Move(Shift::Left)),
        KeyCode::Right => Some(Action::Move(Shift::Right)),
        KeyCode::Down => Some(Action::SoftDrop),
        KeyCode::Up => Some(Action::Rotate(Rotation::Clockwise)),
        KeyCode::Char(' ') => Some(Action::HardDrop),
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::ToggleStart),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Action::ToggleGrid),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        _ => None,
    }
}
