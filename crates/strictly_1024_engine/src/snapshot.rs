//! Read-only view of the session handed to renderers.

use crate::grid::write_board;
use crate::{Grid, Outcome, Tile};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Independent copy of the board plus score metadata.
///
/// Snapshots own their cells, so later moves never alter one that was
/// already published.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// Row-major cell values.
    cells: Vec<Tile>,
    /// Side length N.
    side_length: u8,
    /// Cumulative score.
    score: u64,
    /// Current move number, starting at 1.
    move_number: u32,
    /// Win target for this board size.
    win_tile: Tile,
    /// Set once the game is won or lost.
    outcome: Option<Outcome>,
    /// History move numbers, most recent first.
    history: Vec<u32>,
}

impl Snapshot {
    /// Captures the given state.
    pub fn capture(
        grid: &Grid,
        score: u64,
        move_number: u32,
        win_tile: Tile,
        outcome: Option<Outcome>,
        history: Vec<u32>,
    ) -> Self {
        Self {
            cells: grid.cells().to_vec(),
            side_length: grid.size().get(),
            score,
            move_number,
            win_tile,
            outcome,
            history,
        }
    }

    /// Returns the tile at (row, col).
    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        let side = usize::from(self.side_length);
        if row < side && col < side {
            self.cells.get(row * side + col).copied()
        } else {
            None
        }
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(usize::from(self.side_length).max(1))
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_board(f, self.rows())
    }
}
