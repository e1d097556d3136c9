//! Board storage for the sliding-tile puzzle.

use crate::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Value held by a cell. Zero means empty, otherwise a power of two ≥ 2.
pub type Tile = u32;

/// Smallest supported side length.
pub const MIN_SIDE: u8 = 4;

/// Largest supported side length.
pub const MAX_SIDE: u8 = 12;

/// Largest value a debug placement may write.
///
/// Two of these still merge without overflowing a `Tile`.
pub const MAX_PLACED_TILE: Tile = 1 << 30;

/// Validated side length of a square board.
///
/// Constructing a `BoardSize` is the only place the range check happens,
/// so every `Grid` is guaranteed to be between 4×4 and 12×12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct BoardSize(u8);

impl BoardSize {
    /// Validates a side length.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` if `side` is outside 4..=12.
    #[instrument]
    pub fn new(side: u8) -> Result<Self, GameError> {
        if (MIN_SIDE..=MAX_SIDE).contains(&side) {
            Ok(Self(side))
        } else {
            Err(GameError::InvalidConfiguration {
                size: side.into(),
                min: MIN_SIDE,
                max: MAX_SIDE,
            })
        }
    }

    /// Validates a side length given as a wider integer, such as one typed
    /// by a player.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` if `side` is outside 4..=12.
    pub fn from_side(side: u32) -> Result<Self, GameError> {
        match u8::try_from(side) {
            Ok(side) => Self::new(side),
            Err(_) => Err(GameError::InvalidConfiguration {
                size: side,
                min: MIN_SIDE,
                max: MAX_SIDE,
            }),
        }
    }

    /// Returns the side length.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Returns the side length as an index bound.
    pub fn side(self) -> usize {
        usize::from(self.0)
    }

    /// Returns the number of cells on a board of this size.
    pub fn cell_count(self) -> usize {
        self.side() * self.side()
    }

    /// Returns the next larger size, if any.
    pub fn larger(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }

    /// Returns the next smaller size, if any.
    pub fn smaller(self) -> Option<Self> {
        Self::new(self.0.saturating_sub(1)).ok()
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self(MIN_SIDE)
    }
}

impl TryFrom<u8> for BoardSize {
    type Error = GameError;

    fn try_from(side: u8) -> Result<Self, Self::Error> {
        Self::new(side)
    }
}

impl From<BoardSize> for u8 {
    fn from(size: BoardSize) -> Self {
        size.0
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

/// N×N board of tiles in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: BoardSize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Creates an empty board.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![0; size.cell_count()],
        }
    }

    /// Builds a board from row-major cell values.
    ///
    /// Returns `None` unless `cells` has exactly N*N entries.
    pub fn from_cells(size: BoardSize, cells: Vec<Tile>) -> Option<Self> {
        (cells.len() == size.cell_count()).then_some(Self { size, cells })
    }

    /// Builds a board from nested rows; the row count decides the size.
    ///
    /// Returns `None` for ragged input or an unsupported size.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Option<Self> {
        let side = u8::try_from(rows.len()).ok()?;
        let size = BoardSize::new(side).ok()?;
        let mut cells = Vec::with_capacity(size.cell_count());
        for row in rows {
            let row = row.as_ref();
            if row.len() != size.side() {
                return None;
            }
            cells.extend_from_slice(row);
        }
        Some(Self { size, cells })
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// Returns the side length N.
    pub fn side(&self) -> usize {
        self.size.side()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Converts (row, col) to a row-major index.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.side() + col
    }

    /// Gets the tile at (row, col), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.side() && col < self.side() {
            self.cells.get(self.index(row, col)).copied()
        } else {
            None
        }
    }

    /// Sets the tile at (row, col).
    ///
    /// Returns false and leaves the board untouched when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, tile: Tile) -> bool {
        if row < self.side() && col < self.side() {
            let idx = self.index(row, col);
            self.set_cell(idx, tile)
        } else {
            false
        }
    }

    /// Gets the tile at a row-major index.
    pub fn cell(&self, index: usize) -> Option<Tile> {
        self.cells.get(index).copied()
    }

    /// Sets the tile at a row-major index.
    ///
    /// Returns false and leaves the board untouched when out of bounds.
    pub fn set_cell(&mut self, index: usize, tile: Tile) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = tile;
                true
            }
            None => false,
        }
    }

    /// Returns one row, left to right.
    pub fn row(&self, row: usize) -> &[Tile] {
        let start = row * self.side();
        &self.cells[start..start + self.side()]
    }

    /// Returns one column, top to bottom.
    pub fn column(&self, col: usize) -> Vec<Tile> {
        (0..self.side()).map(|row| self.cells[self.index(row, col)]).collect()
    }

    /// Returns the row-major indices of every empty cell.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == 0)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Returns the number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|tile| **tile != 0).count()
    }

    /// Checks if every cell holds a tile.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|tile| *tile != 0)
    }

    /// Checks if some cell holds exactly `tile`.
    pub fn contains(&self, tile: Tile) -> bool {
        self.cells.contains(&tile)
    }

    /// Returns the largest tile on the board, zero when empty.
    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Tile] {
        &mut self.cells
    }
}

/// Checks that a value may sit in a cell: empty or a power of two ≥ 2.
pub(crate) fn is_legal_tile(tile: Tile) -> bool {
    tile == 0 || (tile >= 2 && tile.is_power_of_two())
}

/// Writes rows in the console board layout: six-wide columns, `.` for empty.
pub(crate) fn write_board<'a>(
    f: &mut fmt::Formatter<'_>,
    rows: impl Iterator<Item = &'a [Tile]>,
) -> fmt::Result {
    for row in rows {
        write!(f, "   ")?;
        for tile in row {
            if *tile == 0 {
                write!(f, "{:>6}", '.')?;
            } else {
                write!(f, "{:>6}", tile)?;
            }
        }
        writeln!(f)?;
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_board(f, (0..self.side()).map(|row| self.row(row)))
    }
}
