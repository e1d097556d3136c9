//! Board initialization and the win target.

use super::spawn::spawn_random_tile;
use crate::{BoardSize, GameError, Grid, MIN_SIDE, Tile};
use rand::Rng;
use tracing::{info, instrument};

/// Target tile on the smallest board; doubles for each extra row.
pub const BASE_TARGET: Tile = 1024;

/// Returns the tile value that wins on a board of `size`.
pub fn win_tile(size: BoardSize) -> Tile {
    BASE_TARGET << (size.get() - MIN_SIDE)
}

/// Creates a fresh board with two spawned tiles and returns it with its win target.
///
/// # Errors
///
/// Only `GameError::BoardFull`, which cannot happen on an empty board of
/// at least sixteen cells.
#[instrument(skip(rng))]
pub fn init_board<R: Rng + ?Sized>(
    size: BoardSize,
    rng: &mut R,
) -> Result<(Grid, Tile), GameError> {
    let mut grid = Grid::new(size);
    spawn_random_tile(&mut grid, rng)?;
    spawn_random_tile(&mut grid, rng)?;

    let target = win_tile(size);
    info!(%size, target, "Board initialized");
    Ok((grid, target))
}
