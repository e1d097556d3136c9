//! Win and loss detection.

use super::slide::{slide, slide_down, slide_left};
use crate::{Direction, Grid, Outcome, Tile};
use strum::IntoEnumIterator;
use tracing::{info, instrument};

/// Decides whether the game has ended and how.
///
/// 1. A tile equal to `win_tile` is a win. Larger tiles do not count.
/// 2. Any empty cell means play continues.
/// 3. On a full board a scratch copy is slid left then down; if that
///    changes nothing, no direction can and the game is lost.
#[instrument(skip(grid), fields(side = grid.side()))]
pub fn evaluate(grid: &Grid, win_tile: Tile) -> Option<Outcome> {
    if grid.contains(win_tile) {
        info!(win_tile, "Target tile reached");
        return Some(Outcome::Win);
    }

    if !grid.is_full() {
        return None;
    }

    let mut probe = grid.clone();
    slide_left(&mut probe);
    slide_down(&mut probe);
    if probe != *grid {
        return None;
    }

    info!("No more available moves");
    Some(Outcome::Loss)
}

/// Returns true if the game is over, either won or lost.
pub fn is_game_over(grid: &Grid, win_tile: Tile) -> bool {
    evaluate(grid, win_tile).is_some()
}

/// Exhaustive check: does any of the four directions change the board?
pub fn has_any_move(grid: &Grid) -> bool {
    Direction::iter().any(|direction| {
        let mut probe = grid.clone();
        slide(&mut probe, direction).changed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[Tile; 4]; 4]) -> Grid {
        Grid::from_rows(&rows).unwrap()
    }

    fn checkerboard() -> Grid {
        board([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ])
    }

    #[test]
    fn test_full_board_without_pairs_is_loss() {
        let grid = checkerboard();
        assert_eq!(evaluate(&grid, 1024), Some(Outcome::Loss));
        assert!(is_game_over(&grid, 1024));
        assert!(!has_any_move(&grid));
    }

    #[test]
    fn test_one_hole_keeps_game_alive() {
        let mut grid = checkerboard();
        grid.set(2, 1, 0);
        assert_eq!(evaluate(&grid, 1024), None);
    }

    #[test]
    fn test_win_tile_wins_anywhere() {
        let mut grid = checkerboard();
        grid.set(3, 3, 1024);
        assert_eq!(evaluate(&grid, 1024), Some(Outcome::Win));

        let mut sparse = board([[0; 4]; 4]);
        sparse.set(1, 2, 1024);
        assert_eq!(evaluate(&sparse, 1024), Some(Outcome::Win));
    }

    #[test]
    fn test_tile_past_the_target_is_not_a_win() {
        let mut sparse = board([[0; 4]; 4]);
        sparse.set(0, 0, 2048);
        assert_eq!(evaluate(&sparse, 1024), None);

        let mut full = checkerboard();
        full.set(0, 0, 2048);
        assert_eq!(evaluate(&full, 1024), Some(Outcome::Loss));
    }

    #[test]
    fn test_full_board_with_horizontal_pair_continues() {
        let mut grid = checkerboard();
        grid.set(0, 1, 2);
        assert_eq!(evaluate(&grid, 1024), None);
    }

    #[test]
    fn test_full_board_with_vertical_pair_continues() {
        let mut grid = checkerboard();
        grid.set(1, 3, 4);
        assert_eq!(evaluate(&grid, 1024), None);
        assert!(has_any_move(&grid));
    }

    #[test]
    fn test_empty_board_is_not_over() {
        assert!(!is_game_over(&board([[0; 4]; 4]), 1024));
    }
}
