//! Random tile placement.

use crate::{GameError, Grid, Tile};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, error, instrument};

/// Places a 2 or a 4 (even odds) on a uniformly chosen empty cell.
///
/// Returns the row-major index and value of the new tile.
///
/// # Errors
///
/// Returns `GameError::BoardFull` when no cell is empty.
#[instrument(skip(grid, rng), fields(side = grid.side()))]
pub fn spawn_random_tile<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
) -> Result<(usize, Tile), GameError> {
    let value: Tile = if rng.gen_bool(0.5) { 4 } else { 2 };

    let empty = grid.empty_cells();
    let Some(&index) = empty.choose(rng) else {
        error!("Spawner called on a full board");
        return Err(GameError::BoardFull);
    };

    grid.set_cell(index, value);
    debug!(index, value, "Spawned tile");
    Ok((index, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_lands_on_empty_cell() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(BoardSize::new(4).unwrap());
        for _ in 0..16 {
            let before = grid.clone();
            let (index, value) = spawn_random_tile(&mut grid, &mut rng).unwrap();
            assert_eq!(before.cell(index), Some(0));
            assert!(value == 2 || value == 4);
            assert_eq!(grid.cell(index), Some(value));
            assert_eq!(grid.occupied_count(), before.occupied_count() + 1);
        }
        assert!(grid.is_full());
    }

    #[test]
    fn test_spawn_on_full_board_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let size = BoardSize::new(4).unwrap();
        let mut grid = Grid::from_cells(size, vec![2; size.cell_count()]).unwrap();
        assert_eq!(
            spawn_random_tile(&mut grid, &mut rng),
            Err(GameError::BoardFull)
        );
    }

    #[test]
    fn test_spawn_fills_only_remaining_hole() {
        let mut rng = StdRng::seed_from_u64(9);
        let size = BoardSize::new(4).unwrap();
        let mut cells = vec![8; size.cell_count()];
        cells[11] = 0;
        let mut grid = Grid::from_cells(size, cells).unwrap();
        let (index, _) = spawn_random_tile(&mut grid, &mut rng).unwrap();
        assert_eq!(index, 11);
    }

    #[test]
    fn test_landing_cell_is_uniform_over_empty_cells() {
        const TRIALS: usize = 6_000;
        let mut rng = StdRng::seed_from_u64(77);
        let size = BoardSize::new(4).unwrap();
        let mut cells = vec![0; size.cell_count()];
        for filled in [0, 2, 3, 5, 6, 8, 9, 11, 12, 14] {
            cells[filled] = 8;
        }
        let board = Grid::from_cells(size, cells).unwrap();
        let empty = board.empty_cells();

        let mut landings = [0usize; 16];
        for _ in 0..TRIALS {
            let mut grid = board.clone();
            let (index, _) = spawn_random_tile(&mut grid, &mut rng).unwrap();
            landings[index] += 1;
        }

        let expected = TRIALS / empty.len();
        for (index, count) in landings.iter().enumerate() {
            if empty.contains(&index) {
                assert!(
                    count.abs_diff(expected) < expected / 6,
                    "cell {index} got {count}, expected about {expected}"
                );
            } else {
                assert_eq!(*count, 0, "occupied cell {index} was chosen");
            }
        }
    }

    #[test]
    fn test_spawn_produces_both_values() {
        let mut rng = StdRng::seed_from_u64(2024);
        let size = BoardSize::new(4).unwrap();
        let (mut twos, mut fours) = (0, 0);
        for _ in 0..400 {
            let mut grid = Grid::new(size);
            match spawn_random_tile(&mut grid, &mut rng).unwrap().1 {
                2 => twos += 1,
                4 => fours += 1,
                other => panic!("unexpected tile {other}"),
            }
        }
        assert!(twos > 100 && fours > 100, "twos={twos} fours={fours}");
    }
}
