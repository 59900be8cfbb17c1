use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Host command decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Restart,
    TogglePause,
    Quit,
    None,
}

/// Maps arrow keys / WASD to moves and a handful of control keys
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::Move(direction);
        }

        match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'q' => KeyAction::Quit,
                'r' => KeyAction::Restart,
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }

    fn direction_for(code: KeyCode) -> Option<Direction> {
        let direction = match code {
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Direction::Up,
                's' => Direction::Down,
                'a' => Direction::Left,
                'd' => Direction::Right,
                _ => return None,
            },
            _ => return None,
        };
        Some(direction)
    }
}
