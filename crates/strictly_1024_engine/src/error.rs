//! Error types for the game engine.

use derive_more::{Display, Error};

/// Error that can occur when configuring a game or applying a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Board size outside the supported range.
    #[display("Board size {size} is out of range (must be {min}-{max})")]
    InvalidConfiguration {
        /// The rejected side length.
        size: u32,
        /// Smallest accepted side length.
        min: u8,
        /// Largest accepted side length.
        max: u8,
    },

    /// Input token that does not name a command.
    #[display("Invalid input '{_0}', please retry")]
    InvalidCommand(#[error(not(source))] String),

    /// Undo requested while the history is at the first move.
    #[display("You cannot undo past the beginning of the game")]
    NoHistory,

    /// Spawner invoked on a board with no empty cell.
    #[display("No empty cell left to place a tile")]
    BoardFull,

    /// Debug placement with an out-of-range index or an illegal tile value.
    #[display("Cannot place {value} at index {index} on a board of {cells} cells")]
    InvalidPlacement {
        /// Requested row-major index.
        index: usize,
        /// Requested tile value.
        value: u32,
        /// Number of cells on the board.
        cells: usize,
    },

    /// Gameplay command after the game was won or lost.
    #[display("Game is already over")]
    GameOver,

    /// Any command after the session exited.
    #[display("Session has exited")]
    SessionExited,

    /// A session invariant failed after a command (debug builds only).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(#[error(not(source))] String),
}

impl GameError {
    /// Returns true if the session is still usable after this error.
    ///
    /// `BoardFull` means the controller broke its own call ordering and the
    /// session must not continue.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            GameError::BoardFull | GameError::SessionExited | GameError::InvariantViolation(_)
        )
    }
}
