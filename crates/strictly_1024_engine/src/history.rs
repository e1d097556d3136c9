//! Undo history of completed moves.
//!
//! Entries are stored oldest-first in a `Vec`; the head is the last element.
//! The oldest entry is always move 1 and is never popped.

use crate::{GameError, Grid};
use derive_getters::Getters;
use tracing::{debug, instrument, warn};

/// Board, score and move number right after one completed move.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HistoryEntry {
    /// Owned copy of the board.
    grid: Grid,
    /// Cumulative score.
    score: u64,
    /// Move number, starting at 1.
    move_number: u32,
}

impl HistoryEntry {
    /// Creates an entry from an owned board copy.
    pub fn new(grid: Grid, score: u64, move_number: u32) -> Self {
        Self {
            grid,
            score,
            move_number,
        }
    }
}

/// Stack of move snapshots supporting undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a new head entry holding a copy of `grid`.
    #[instrument(skip(self, grid))]
    pub fn push(&mut self, grid: &Grid, score: u64, move_number: u32) {
        self.entries
            .push(HistoryEntry::new(grid.clone(), score, move_number));
        debug!(depth = self.entries.len(), "History entry pushed");
    }

    /// Discards the head and returns the entry that becomes the new head.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoHistory` when the head is move 1 (or the
    /// history is empty).
    #[instrument(skip(self), fields(depth = self.entries.len()))]
    pub fn undo(&mut self) -> Result<&HistoryEntry, GameError> {
        match self.head() {
            Some(head) if head.move_number > 1 && self.entries.len() > 1 => {}
            _ => {
                warn!("Cannot undo past the beginning of the game");
                return Err(GameError::NoHistory);
            }
        }

        self.entries.pop();
        let head = self.entries.last().ok_or(GameError::NoHistory)?;
        debug!(move_number = head.move_number, "Undid move");
        Ok(head)
    }

    /// Returns the most recent entry.
    pub fn head(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates from the head toward the oldest entry.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns move numbers head-first, e.g. `[3, 2, 1]`.
    pub fn move_numbers(&self) -> Vec<u32> {
        self.iter().map(|entry| entry.move_number).collect()
    }
}
