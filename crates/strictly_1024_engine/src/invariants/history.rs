//! History invariants: rooted at move 1, contiguous, and in step with the live state.

use super::Invariant;
use crate::GameSession;

/// Invariant: the oldest entry is move 1 and numbers rise by one toward the head.
pub struct HistoryContiguousInvariant;

impl Invariant<GameSession> for HistoryContiguousInvariant {
    fn holds(session: &GameSession) -> bool {
        let mut numbers = session.history().move_numbers();
        numbers.reverse();
        !numbers.is_empty()
            && numbers
                .iter()
                .zip(1u32..)
                .all(|(number, expected)| *number == expected)
    }

    fn description() -> &'static str {
        "History starts at move 1 with one entry per move"
    }
}

/// Invariant: the history head carries the live score and move number.
///
/// The board itself may differ from the head after a debug placement,
/// which edits the live board without recording a move.
pub struct HistoryMirrorsLiveInvariant;

impl Invariant<GameSession> for HistoryMirrorsLiveInvariant {
    fn holds(session: &GameSession) -> bool {
        session.history().head().is_some_and(|head| {
            *head.score() == session.score() && *head.move_number() == session.move_number()
        })
    }

    fn description() -> &'static str {
        "History head matches the live score and move number"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoardSize, Command, Direction};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> GameSession {
        GameSession::new(BoardSize::new(4).unwrap(), StdRng::seed_from_u64(21)).unwrap()
    }

    #[test]
    fn test_fresh_history_holds() {
        let game = session();
        assert!(HistoryContiguousInvariant::holds(&game));
        assert!(HistoryMirrorsLiveInvariant::holds(&game));
    }

    #[test]
    fn test_holds_across_moves_and_undo() {
        let mut game = session();
        for dir in [Direction::Left, Direction::Down, Direction::Right] {
            game.apply(Command::Move(dir)).unwrap();
        }
        if game.move_number() > 1 {
            game.apply(Command::Undo).unwrap();
        }
        assert!(HistoryContiguousInvariant::holds(&game));
        assert!(HistoryMirrorsLiveInvariant::holds(&game));
    }

    #[test]
    fn test_gap_in_move_numbers_violates() {
        let mut game = session();
        let grid = game.grid().clone();
        game.history_mut().push(&grid, 0, 3);
        assert!(!HistoryContiguousInvariant::holds(&game));
        assert!(!HistoryMirrorsLiveInvariant::holds(&game));
    }
}
