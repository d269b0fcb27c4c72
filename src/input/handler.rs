use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

/// What a key event means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    DashPress,
    DashRelease,
    /// Start or restart a run
    Start,
    ToggleMute,
    VolumeUp,
    VolumeDown,
    Quit,
    None,
}

/// Maps physical keys to game actions
///
/// Dash rides the space bar as a press/release pair; everything else acts
/// on press only. Release reporting needs the kitty keyboard protocol, so
/// the front end falls back to press-to-toggle when the terminal lacks it.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return match key.code {
                KeyCode::Char(' ') => KeyAction::DashRelease,
                _ => KeyAction::None,
            };
        }
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - arrow keys
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Right => KeyAction::Turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Turn(Direction::Right),

            KeyCode::Char(' ') => KeyAction::DashPress,

            // Controls
            KeyCode::Enter => KeyAction::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Start,
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::ToggleMute,
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::VolumeUp,
            KeyCode::Char('-') => KeyAction::VolumeDown,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
