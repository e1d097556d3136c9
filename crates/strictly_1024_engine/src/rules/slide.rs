//! Slide-and-merge moves.
//!
//! Every move decomposes into independent lines: rows for left/right,
//! columns for up/down. Each line is addressed through a list of cell
//! indices ordered from the target edge inward, so one scan routine serves
//! all four directions.

use crate::{Direction, Grid, Tile};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Outcome of applying one move to a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveResult {
    /// Whether any cell differs from the pre-move grid.
    pub changed: bool,
    /// Sum of the tiles produced by merges during this move.
    pub score_delta: u64,
}

/// Slides every tile toward `direction`, merging equal neighbours once.
#[instrument(skip(grid), fields(side = grid.side()))]
pub fn slide(grid: &mut Grid, direction: Direction) -> MoveResult {
    let before = grid.cells().to_vec();
    let side = grid.side();
    let mut score_delta = 0;

    for line in 0..side {
        let indices = line_indices(side, direction, line);
        score_delta += merge_line(grid.cells_mut(), &indices);
    }

    let changed = before.as_slice() != grid.cells();
    debug!(changed, score_delta, "Move applied");
    MoveResult {
        changed,
        score_delta,
    }
}

/// Slides all tiles left.
pub fn slide_left(grid: &mut Grid) -> MoveResult {
    slide(grid, Direction::Left)
}

/// Slides all tiles right.
pub fn slide_right(grid: &mut Grid) -> MoveResult {
    slide(grid, Direction::Right)
}

/// Slides all tiles up.
pub fn slide_up(grid: &mut Grid) -> MoveResult {
    slide(grid, Direction::Up)
}

/// Slides all tiles down.
pub fn slide_down(grid: &mut Grid) -> MoveResult {
    slide(grid, Direction::Down)
}

/// Row-major indices of one line, position 0 touching the target edge.
fn line_indices(side: usize, direction: Direction, line: usize) -> Vec<usize> {
    (0..side)
        .map(|step| match direction {
            Direction::Left => line * side + step,
            Direction::Right => line * side + (side - 1 - step),
            Direction::Up => step * side + line,
            Direction::Down => (side - 1 - step) * side + line,
        })
        .collect()
}

/// Runs the scan-and-limit pass over one line and returns its score.
///
/// `limit` is the nearest position a tile may still merge into. After a
/// merge it moves to the vacated source cell, so a tile that later slides
/// up against the merged tile rests beside it without combining again.
fn merge_line(cells: &mut [Tile], line: &[usize]) -> u64 {
    let mut limit = 0;
    let mut score = 0;

    for pos in 1..line.len() {
        if cells[line[pos]] == 0 {
            continue;
        }

        let mut current = pos;
        while current > limit && cells[line[current - 1]] == 0 {
            cells[line[current - 1]] = cells[line[current]];
            cells[line[current]] = 0;
            current -= 1;
        }

        // Equal tiles whose sum does not fit a `Tile` stay apart.
        if current > limit
            && cells[line[current - 1]] == cells[line[current]]
            && let Some(merged) = cells[line[current - 1]].checked_add(cells[line[current]])
        {
            cells[line[current - 1]] = merged;
            cells[line[current]] = 0;
            limit = current;
            score += u64::from(merged);
        }
    }

    score
}
