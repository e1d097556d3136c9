//! Game controller: one owned session driven by commands.

use crate::grid::{MAX_PLACED_TILE, is_legal_tile};
#[cfg(debug_assertions)]
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::rules::{evaluate, init_board, slide};
use crate::{
    BoardSize, Command, Direction, GameError, Grid, History, MoveResult, Phase, Snapshot, Tile,
    spawn_random_tile,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

/// Live game state plus the undo history.
///
/// The session exclusively owns its board and history. Everything handed
/// out (snapshots, history entries) is a copy.
///
/// State machine:
/// - `Playing` accepts every command
/// - `Won` / `Lost` accept only `Reset` and `Exit`
/// - `Exited` accepts nothing
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    score: u64,
    move_number: u32,
    win_tile: Tile,
    history: History,
    phase: Phase,
    rng: StdRng,
}

impl GameSession {
    /// Starts a game on a fresh board using the given random source.
    ///
    /// # Errors
    ///
    /// Propagates `GameError::BoardFull` from initial spawning, which
    /// indicates a defect rather than a user error.
    #[instrument(skip(rng))]
    pub fn new(size: BoardSize, mut rng: StdRng) -> Result<Self, GameError> {
        let (grid, win_tile) = init_board(size, &mut rng)?;
        let mut history = History::new();
        history.push(&grid, 0, 1);

        info!(%size, win_tile, "Game session started");
        Ok(Self {
            grid,
            score: 0,
            move_number: 1,
            win_tile,
            history,
            phase: Phase::Playing,
            rng,
        })
    }

    /// Starts a reproducible game.
    pub fn seeded(size: BoardSize, seed: u64) -> Result<Self, GameError> {
        Self::new(size, StdRng::seed_from_u64(seed))
    }

    /// Starts a game seeded from the operating system.
    pub fn from_entropy(size: BoardSize) -> Result<Self, GameError> {
        Self::new(size, StdRng::from_entropy())
    }

    /// Applies one command and returns the resulting phase.
    ///
    /// Commands are validated before anything changes, so a rejected
    /// command leaves the session exactly as it was.
    ///
    /// # Errors
    ///
    /// - `SessionExited` for any command after `Exit`
    /// - `GameOver` for gameplay commands after a win or loss
    /// - `NoHistory`, `InvalidConfiguration`, `InvalidPlacement` from the
    ///   individual operations
    #[instrument(skip(self), fields(phase = ?self.phase, move_number = self.move_number))]
    pub fn apply(&mut self, command: Command) -> Result<Phase, GameError> {
        self.ensure_accepts(&command)?;

        match command {
            Command::Move(direction) => {
                self.slide(direction)?;
            }
            Command::Undo => self.undo()?,
            Command::Reset(side) => self.reset(side)?,
            Command::PlaceDebug { index, value } => self.place_debug(index, value)?,
            Command::Exit => self.exit(),
        }

        self.verify()?;
        Ok(self.phase)
    }

    /// Slides the board; on change spawns a tile, advances the move and records history.
    ///
    /// The terminal check runs after every slide. An unchanged board can
    /// only be terminal if it was edited by a debug placement.
    #[instrument(skip(self))]
    pub fn slide(&mut self, direction: Direction) -> Result<MoveResult, GameError> {
        self.ensure_accepts(&Command::Move(direction))?;

        let result = slide(&mut self.grid, direction);
        if result.changed {
            self.score += result.score_delta;
            spawn_random_tile(&mut self.grid, &mut self.rng)?;
            self.move_number += 1;
            self.history.push(&self.grid, self.score, self.move_number);
            debug!(
                score = self.score,
                move_number = self.move_number,
                "Move accepted"
            );
        } else {
            debug!("Board did not change");
        }

        if let Some(outcome) = evaluate(&self.grid, self.win_tile) {
            info!(%outcome, score = self.score, "Game finished");
            self.phase = outcome.into();
        }
        Ok(result)
    }

    /// Restores the state after the previous move.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoHistory` at move 1.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<(), GameError> {
        self.ensure_accepts(&Command::Undo)?;

        let entry = self.history.undo()?;
        self.grid = entry.grid().clone();
        self.score = *entry.score();
        self.move_number = *entry.move_number();
        info!(move_number = self.move_number, "Undoing move");
        Ok(())
    }

    /// Starts over on a board of `side` × `side`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` if `side` is outside 4..=12;
    /// the current game is left untouched in that case.
    #[instrument(skip(self))]
    pub fn reset(&mut self, side: u32) -> Result<(), GameError> {
        self.ensure_accepts(&Command::Reset(side))?;

        let size = BoardSize::from_side(side).inspect_err(|e| warn!(%e, "Rejected board size"))?;
        let (grid, win_tile) = init_board(size, &mut self.rng)?;

        self.history.clear();
        self.grid = grid;
        self.win_tile = win_tile;
        self.score = 0;
        self.move_number = 1;
        self.history.push(&self.grid, self.score, self.move_number);
        self.phase = Phase::Playing;
        info!(%size, win_tile, "Resetting board");
        Ok(())
    }

    /// Overwrites one cell without spawning, advancing or recording history.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidPlacement` for an index off the board, a
    /// value that is neither 0 nor a power of two ≥ 2, or a value above
    /// [`MAX_PLACED_TILE`].
    #[instrument(skip(self))]
    pub fn place_debug(&mut self, index: usize, value: Tile) -> Result<(), GameError> {
        self.ensure_accepts(&Command::PlaceDebug { index, value })?;

        let cells = self.grid.cells().len();
        if index >= cells || !is_legal_tile(value) || value > MAX_PLACED_TILE {
            warn!(index, value, "Rejected debug placement");
            return Err(GameError::InvalidPlacement {
                index,
                value,
                cells,
            });
        }

        self.grid.set_cell(index, value);
        debug!(index, value, "Debug tile placed");
        Ok(())
    }

    /// Ends the session. Later commands fail with `SessionExited`.
    #[instrument(skip(self))]
    pub fn exit(&mut self) {
        if self.phase != Phase::Exited {
            info!(score = self.score, move_number = self.move_number, "Session exited");
            self.phase = Phase::Exited;
        }
    }

    /// Captures a read-only copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            &self.grid,
            self.score,
            self.move_number,
            self.win_tile,
            self.phase.outcome(),
            self.history.move_numbers(),
        )
    }

    /// Returns the live board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the cumulative score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns the current move number (1 before any move).
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Returns the tile value that wins this game.
    pub fn win_tile(&self) -> Tile {
        self.win_tile
    }

    /// Returns the board size.
    pub fn size(&self) -> BoardSize {
        self.grid.size()
    }

    /// Returns the controller phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    fn ensure_accepts(&self, command: &Command) -> Result<(), GameError> {
        match self.phase {
            Phase::Exited => Err(GameError::SessionExited),
            Phase::Won | Phase::Lost if command.is_gameplay() => {
                warn!(%command, phase = ?self.phase, "Command rejected after game end");
                Err(GameError::GameOver)
            }
            _ => Ok(()),
        }
    }

    /// Checks session invariants in debug builds.
    fn verify(&self) -> Result<(), GameError> {
        #[cfg(debug_assertions)]
        SessionInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Session invariant violated");
            GameError::InvariantViolation(descriptions)
        })?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    fn session(side: u8, seed: u64) -> GameSession {
        GameSession::seeded(BoardSize::new(side).unwrap(), seed).unwrap()
    }

    /// Replaces the live board, keeping history in step as if it were dealt.
    fn deal(game: &mut GameSession, rows: [[Tile; 4]; 4]) {
        game.grid = Grid::from_rows(&rows).unwrap();
        game.history.clear();
        game.history.push(&game.grid, game.score, game.move_number);
    }

    #[test]
    fn test_new_session_state() {
        let game = session(4, 1);
        assert_eq!(game.grid().occupied_count(), 2);
        assert_eq!(game.score(), 0);
        assert_eq!(game.move_number(), 1);
        assert_eq!(game.win_tile(), 1024);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_changed_move_spawns_and_records() {
        let mut game = session(4, 2);
        deal(&mut game, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);

        let result = game.slide(Direction::Left).unwrap();
        assert!(result.changed);
        assert_eq!(result.score_delta, 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.move_number(), 2);
        assert_eq!(game.grid().occupied_count(), 2);
        assert_eq!(game.grid().cell(0), Some(4));
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_unchanged_move_records_nothing() {
        let mut game = session(4, 3);
        deal(&mut game, [[0, 0, 0, 2], [0; 4], [0; 4], [0; 4]]);

        let result = game.slide(Direction::Right).unwrap();
        assert!(!result.changed);
        assert_eq!(game.move_number(), 1);
        assert_eq!(game.grid().occupied_count(), 1);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_undo_restores_previous_move() {
        let mut game = session(4, 4);
        deal(&mut game, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let start = game.grid().clone();

        game.apply(Command::Move(Direction::Left)).unwrap();
        game.apply(Command::Undo).unwrap();
        assert_eq!(game.grid(), &start);
        assert_eq!(game.score(), 0);
        assert_eq!(game.move_number(), 1);
        assert_eq!(game.apply(Command::Undo), Err(GameError::NoHistory));
    }

    #[test]
    fn test_reset_rejects_bad_size_without_mutation() {
        let mut game = session(4, 5);
        game.apply(Command::Move(Direction::Left)).ok();
        let before = game.snapshot();

        assert!(matches!(
            game.apply(Command::Reset(13)),
            Err(GameError::InvalidConfiguration { size: 13, .. })
        ));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_reset_reports_oversized_numbers_as_out_of_range() {
        let mut game = session(4, 3);
        let before = game.snapshot();
        assert!(matches!(
            game.apply(Command::Reset(300)),
            Err(GameError::InvalidConfiguration { size: 300, min: 4, max: 12 })
        ));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_reset_changes_size_and_target() {
        let mut game = session(4, 6);
        game.apply(Command::Reset(6)).unwrap();
        assert_eq!(game.size().get(), 6);
        assert_eq!(game.win_tile(), 4096);
        assert_eq!(game.grid().occupied_count(), 2);
        assert_eq!(game.history().move_numbers(), vec![1]);
    }

    #[test]
    fn test_place_debug_edits_only_the_cell() {
        let mut game = session(4, 7);
        deal(&mut game, [[0; 4], [0; 4], [0; 4], [0; 4]]);

        game.apply(Command::PlaceDebug { index: 5, value: 64 }).unwrap();
        assert_eq!(game.grid().get(1, 1), Some(64));
        assert_eq!(game.move_number(), 1);
        assert_eq!(game.grid().occupied_count(), 1);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_place_debug_validates() {
        let mut game = session(4, 8);
        let before = game.snapshot();
        assert!(matches!(
            game.apply(Command::PlaceDebug { index: 16, value: 2 }),
            Err(GameError::InvalidPlacement { index: 16, .. })
        ));
        assert!(game.apply(Command::PlaceDebug { index: 0, value: 3 }).is_err());
        assert!(matches!(
            game.apply(Command::PlaceDebug { index: 0, value: 1 << 31 }),
            Err(GameError::InvalidPlacement { value: 0x8000_0000, .. })
        ));
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_largest_placed_tiles_merge_safely() {
        let mut game = session(4, 8);
        deal(&mut game, [[0; 4], [0; 4], [0; 4], [0; 4]]);
        game.apply(Command::PlaceDebug { index: 0, value: MAX_PLACED_TILE })
            .unwrap();
        game.apply(Command::PlaceDebug { index: 1, value: MAX_PLACED_TILE })
            .unwrap();

        game.apply(Command::Move(Direction::Left)).unwrap();
        assert_eq!(game.grid().cell(0), Some(1 << 31));
        assert_eq!(game.score(), 1 << 31);

        game.apply(Command::PlaceDebug { index: 1, value: MAX_PLACED_TILE })
            .unwrap();
        game.apply(Command::PlaceDebug { index: 2, value: MAX_PLACED_TILE })
            .unwrap();
        game.apply(Command::Move(Direction::Left)).unwrap();
        assert!(game.grid().cells().iter().all(|tile| *tile <= 1 << 31));
    }

    #[test]
    fn test_winning_move_ends_game() {
        let mut game = session(4, 9);
        deal(&mut game, [[512, 512, 0, 0], [0; 4], [0; 4], [0; 4]]);

        assert_eq!(game.apply(Command::Move(Direction::Left)), Ok(Phase::Won));
        assert_eq!(game.snapshot().outcome(), &Some(Outcome::Win));
        assert_eq!(
            game.apply(Command::Move(Direction::Right)),
            Err(GameError::GameOver)
        );
        assert_eq!(game.apply(Command::Undo), Err(GameError::GameOver));
        assert_eq!(game.apply(Command::Reset(4)), Ok(Phase::Playing));
    }

    #[test]
    fn test_losing_move_ends_game() {
        let mut game = session(4, 10);
        // Sliding left fills the hole at the end of the top row; whatever
        // spawns there (2 or 4) leaves no equal neighbours.
        deal(
            &mut game,
            [
                [0, 8, 16, 32],
                [16, 32, 64, 128],
                [32, 64, 128, 256],
                [64, 128, 256, 512],
            ],
        );

        assert_eq!(game.apply(Command::Move(Direction::Left)), Ok(Phase::Lost));
        assert_eq!(game.snapshot().outcome(), &Some(Outcome::Loss));
    }

    #[test]
    fn test_exit_is_terminal() {
        let mut game = session(4, 11);
        assert_eq!(game.apply(Command::Exit), Ok(Phase::Exited));
        assert_eq!(game.apply(Command::Reset(4)), Err(GameError::SessionExited));
        assert_eq!(game.apply(Command::Exit), Err(GameError::SessionExited));
    }
}
