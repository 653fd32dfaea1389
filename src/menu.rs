use crate::input::MenuAction;

/// Entries of the main menu, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    NewGame,
    HighScores,
    Controls,
    Exit,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 4] = [
        MenuEntry::NewGame,
        MenuEntry::HighScores,
        MenuEntry::Controls,
        MenuEntry::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::NewGame => "New Game",
            MenuEntry::HighScores => "High Scores",
            MenuEntry::Controls => "Controls",
            MenuEntry::Exit => "Exit",
        }
    }
}

/// Selection state of the main menu. Moving past either end wraps around.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> MenuEntry {
        MenuEntry::ALL[self.selected]
    }

    #[cfg(test)]
    pub(crate) fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn move_up(&mut self) {
        let count = MenuEntry::ALL.len();
        self.selected = (self.selected + count - 1) % count;
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % MenuEntry::ALL.len();
    }

    /// Apply a menu key. Returns the entry to open, if the key picked one.
    pub fn apply(&mut self, action: MenuAction) -> Option<MenuEntry> {
        match action {
            MenuAction::Up => {
                self.move_up();
                None
            }
            MenuAction::Down => {
                self.move_down();
                None
            }
            MenuAction::Select => Some(self.selected()),
            MenuAction::Exit => Some(MenuEntry::Exit),
        }
    }
}
