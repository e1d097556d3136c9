//! Terminal UI for Strictly 1024.

mod input;
mod ui;

pub use input::{KeyboardInput, key_to_command};
pub use ui::{draw, status_line};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use strictly_1024_engine::{GameError, GameSession, Renderer, Snapshot, run};
use tracing::{error, info, instrument};

/// Draws each published snapshot into a ratatui terminal.
pub struct BoardRenderer<B: Backend> {
    terminal: Terminal<B>,
    last: Option<Snapshot>,
    message: String,
    frame_delay: Duration,
}

impl<B: Backend> BoardRenderer<B> {
    /// Wraps a terminal.
    pub fn new(terminal: Terminal<B>, frame_delay: Duration) -> Self {
        Self {
            terminal,
            last: None,
            message: String::new(),
            frame_delay,
        }
    }

    /// Returns the wrapped terminal.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    fn redraw(&mut self) -> io::Result<()> {
        let Some(snapshot) = &self.last else {
            return Ok(());
        };
        let message = &self.message;
        self.terminal
            .draw(|frame| ui::draw(frame, snapshot, message))
            .map_err(|e| io::Error::other(e.to_string()))?;
        Ok(())
    }
}

impl<B: Backend> Renderer for BoardRenderer<B> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.last = Some(snapshot.clone());
        self.message.clear();
        self.redraw()?;
        if !self.frame_delay.is_zero() {
            std::thread::sleep(self.frame_delay);
        }
        Ok(())
    }

    fn notice(&mut self, error: &GameError) -> io::Result<()> {
        self.message = error.to_string();
        self.redraw()
    }
}

/// Runs the terminal UI on `session` until the player quits.
///
/// Raw mode and the alternate screen are restored even when the game
/// loop fails.
#[instrument(skip_all, fields(size = %session.size()))]
pub fn run_tui(session: &mut GameSession, frame_delay: Duration) -> Result<Snapshot> {
    info!("Starting Strictly 1024 TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut input = KeyboardInput::new(session.size());
    let mut renderer = BoardRenderer::new(terminal, frame_delay);
    let res = run(session, &mut input, &mut renderer);

    disable_raw_mode()?;
    execute!(renderer.terminal_mut().backend_mut(), LeaveAlternateScreen)?;
    renderer.terminal_mut().show_cursor()?;

    match res {
        Ok(last) => {
            info!(score = last.score(), "TUI session finished");
            Ok(last)
        }
        Err(err) => {
            error!(error = %err, "Game loop error");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use strictly_1024_engine::BoardSize;

    #[test]
    fn test_notice_keeps_last_board() {
        let terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        let mut renderer = BoardRenderer::new(terminal, Duration::ZERO);
        let game = GameSession::seeded(BoardSize::default(), 4).unwrap();

        renderer.render(&game.snapshot()).unwrap();
        renderer.notice(&GameError::NoHistory).unwrap();
        assert_eq!(renderer.last, Some(game.snapshot()));
        assert_eq!(renderer.message, GameError::NoHistory.to_string());

        renderer.render(&game.snapshot()).unwrap();
        assert!(renderer.message.is_empty());
    }
}
