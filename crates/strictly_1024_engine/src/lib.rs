//! Strictly 1024 engine - pure rules for a sliding-tile merge puzzle.
//!
//! The engine owns everything that decides what the board looks like:
//!
//! - **Grid**: an N×N board of power-of-two tiles, 4 ≤ N ≤ 12
//! - **Rules**: the four slide-and-merge moves, tile spawning and
//!   terminal-state detection
//! - **History**: the undo stack of per-move snapshots
//! - **Session**: the controller state machine tying them together
//!
//! Rendering and input live outside the engine. Frontends implement
//! [`Renderer`] and [`InputSource`] and hand them to [`run`].
//!
//! # Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use strictly_1024_engine::{BoardSize, Command, Direction, GameSession};
//!
//! # fn main() -> Result<(), strictly_1024_engine::GameError> {
//! let size = BoardSize::new(4)?;
//! let mut session = GameSession::new(size, StdRng::seed_from_u64(7))?;
//! session.apply(Command::Move(Direction::Left))?;
//! assert!(session.move_number() >= 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod driver;
mod error;
mod grid;
mod history;
mod invariants;
mod phases;
pub mod rules;
mod session;
mod snapshot;

pub use action::{Command, Direction, parse_side};
pub use driver::{DriverError, Input, InputSource, Renderer, run};
pub use error::GameError;
pub use grid::{BoardSize, Grid, MAX_PLACED_TILE, MAX_SIDE, MIN_SIDE, Tile};
pub use history::{History, HistoryEntry};
pub use invariants::{
    HistoryContiguousInvariant, HistoryMirrorsLiveInvariant, Invariant, InvariantSet,
    InvariantViolation, SessionInvariants, TileValuesInvariant,
};
pub use phases::{Outcome, Phase};
pub use rules::{MoveResult, init_board, is_game_over, slide, spawn_random_tile, win_tile};
pub use session::GameSession;
pub use snapshot::Snapshot;
