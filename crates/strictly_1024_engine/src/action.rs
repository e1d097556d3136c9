//! First-class command types.
//!
//! Commands are the player's intent. The input source produces them and the
//! session validates them before anything on the board changes.

use crate::{GameError, Tile};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Direction tiles slide toward.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
}

impl Direction {
    /// Returns the console key bound to this direction.
    pub fn key(self) -> char {
        match self {
            Direction::Left => 'a',
            Direction::Right => 'd',
            Direction::Up => 'w',
            Direction::Down => 's',
        }
    }

    /// Returns true for directions that slide along rows.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// One command from the input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Slide every tile in a direction.
    Move(Direction),
    /// Return to the state after the previous move.
    Undo,
    /// Start a new game on a board of the given side length.
    Reset(u32),
    /// Overwrite one cell without advancing the game.
    PlaceDebug {
        /// Row-major cell index.
        index: usize,
        /// Tile value to store.
        value: Tile,
    },
    /// Leave the session.
    Exit,
}

impl Command {
    /// Returns true for commands that only make sense while playing.
    pub fn is_gameplay(&self) -> bool {
        matches!(
            self,
            Command::Move(_) | Command::Undo | Command::PlaceDebug { .. }
        )
    }
}

/// Parses a board side length typed by a player.
///
/// Any run of digits is a side length, however large; numbers that do not
/// fit a `u32` become `u32::MAX` so they are reported as out of range
/// rather than as garbage. Returns `None` for anything that is not a
/// number.
pub fn parse_side(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(token.parse().unwrap_or(u32::MAX))
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Move(dir) => write!(f, "move {}", dir),
            Command::Undo => write!(f, "undo"),
            Command::Reset(size) => write!(f, "reset {}", size),
            Command::PlaceDebug { index, value } => write!(f, "place {} at {}", value, index),
            Command::Exit => write!(f, "exit"),
        }
    }
}

/// Parses the console token syntax: `a d w s u x`, `r <size>`, `p <index> <value>`.
///
/// Keys are case-insensitive. A bare `r` is not a complete command here;
/// frontends that support prompting for the size handle it before parsing.
impl FromStr for Command {
    type Err = GameError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidCommand(line.trim().to_string());
        let mut parts = line.split_whitespace();
        let key = parts.next().ok_or_else(invalid)?.to_ascii_lowercase();

        let command = match key.as_str() {
            "a" => Command::Move(Direction::Left),
            "d" => Command::Move(Direction::Right),
            "w" => Command::Move(Direction::Up),
            "s" => Command::Move(Direction::Down),
            "u" => Command::Undo,
            "x" => Command::Exit,
            "r" => {
                let size = parts.next().ok_or_else(invalid)?;
                Command::Reset(parse_side(size).ok_or_else(invalid)?)
            }
            "p" => {
                let index = parts.next().ok_or_else(invalid)?;
                let value = parts.next().ok_or_else(invalid)?;
                Command::PlaceDebug {
                    index: index.parse().map_err(|_| invalid())?,
                    value: value.parse().map_err(|_| invalid())?,
                }
            }
            _ => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(command)
    }
}
