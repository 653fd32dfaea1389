use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

/// What a key press means on the menu screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Select,
    Exit,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key press during play. Unrecognised keys yield `None`.
    pub fn handle_game_key(&self, key: KeyEvent) -> Option<Action> {
        if is_ctrl_c(&key) {
            return Some(Action::Quit);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Some(Action::Move(Direction::Up)),
            KeyCode::Down => Some(Action::Move(Direction::Down)),
            KeyCode::Left => Some(Action::Move(Direction::Left)),
            KeyCode::Right => Some(Action::Move(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Move(Direction::Up)),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Move(Direction::Down)),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Move(Direction::Left)),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Move(Direction::Right)),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),

            _ => None,
        }
    }

    /// Translate a key press on the main menu
    pub fn handle_menu_key(&self, key: KeyEvent) -> Option<MenuAction> {
        if is_ctrl_c(&key) {
            return Some(MenuAction::Exit);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(MenuAction::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(MenuAction::Down),
            KeyCode::Enter => Some(MenuAction::Select),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MenuAction::Exit),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
