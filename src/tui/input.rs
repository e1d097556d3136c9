//! Keyboard input for the terminal UI.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use strictly_1024_engine::{BoardSize, Command, Direction, GameError, Input, InputSource};
use tracing::{debug, instrument};

/// Maps a key press to a command on a board of `size`.
///
/// Returns `None` for keys with no binding, and for `[`/`]` when the
/// board is already at the smallest or largest size.
pub fn key_to_command(key: KeyCode, size: BoardSize) -> Option<Command> {
    let command = match key {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Move(Direction::Right)
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Move(Direction::Down),
        KeyCode::Char('u') | KeyCode::Char('U') => Command::Undo,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Reset(size.get().into()),
        KeyCode::Char('[') => Command::Reset(size.smaller()?.get().into()),
        KeyCode::Char(']') => Command::Reset(size.larger()?.get().into()),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('x') | KeyCode::Char('X') => {
            Command::Exit
        }
        KeyCode::Esc => Command::Exit,
        _ => return None,
    };
    Some(command)
}

/// Reads key presses from the terminal.
pub struct KeyboardInput {
    size: BoardSize,
}

impl KeyboardInput {
    /// Creates a keyboard source for a session on a board of `size`.
    pub fn new(size: BoardSize) -> Self {
        Self { size }
    }

    /// Board size the next reset keys are relative to.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Resolves one key event, tracking resets.
    #[instrument(skip(self), fields(size = %self.size))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let command = key_to_command(key.code, self.size)?;
        if let Command::Reset(side) = command
            && let Ok(size) = BoardSize::from_side(side)
        {
            self.size = size;
        }
        debug!(%command, "Key mapped");
        Some(command)
    }
}

impl InputSource for KeyboardInput {
    fn next_input(&mut self) -> std::io::Result<Input> {
        loop {
            if let Event::Key(key) = event::read()?
                && let Some(command) = self.handle_key(key)
            {
                return Ok(Input::Command(command));
            }
        }
    }

    fn rejected(&mut self, command: &Command, error: &GameError) {
        debug!(%command, %error, "Key command rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_and_letters_agree() {
        let size = BoardSize::default();
        assert_eq!(key_to_command(KeyCode::Left, size), key_to_command(KeyCode::Char('a'), size));
        assert_eq!(key_to_command(KeyCode::Up, size), Some(Command::Move(Direction::Up)));
        assert_eq!(key_to_command(KeyCode::Esc, size), Some(Command::Exit));
        assert_eq!(key_to_command(KeyCode::Char('z'), size), None);
    }

    #[test]
    fn test_size_keys_stop_at_bounds() {
        let smallest = BoardSize::new(4).unwrap();
        let largest = BoardSize::new(12).unwrap();
        assert_eq!(key_to_command(KeyCode::Char('['), smallest), None);
        assert_eq!(key_to_command(KeyCode::Char(']'), largest), None);
        assert_eq!(
            key_to_command(KeyCode::Char(']'), smallest),
            Some(Command::Reset(5))
        );
    }

    #[test]
    fn test_resets_follow_the_size() {
        let mut input = KeyboardInput::new(BoardSize::default());
        assert_eq!(input.handle_key(press(KeyCode::Char(']'))), Some(Command::Reset(5)));
        assert_eq!(input.handle_key(press(KeyCode::Char(']'))), Some(Command::Reset(6)));
        assert_eq!(input.handle_key(press(KeyCode::Char('r'))), Some(Command::Reset(6)));
        assert_eq!(input.size().get(), 6);
    }
}
