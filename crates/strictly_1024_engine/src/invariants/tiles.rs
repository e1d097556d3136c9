//! Tile value invariant: every cell is empty or a power of two ≥ 2.

use super::Invariant;
use crate::GameSession;
use crate::grid::is_legal_tile;

/// Invariant: cells hold 0 or a power of two of at least 2.
///
/// Merges only ever add two equal powers of two, and spawns only place
/// 2 or 4, so any other value means the board was corrupted.
pub struct TileValuesInvariant;

impl Invariant<GameSession> for TileValuesInvariant {
    fn holds(session: &GameSession) -> bool {
        session.grid().cells().iter().all(|tile| is_legal_tile(*tile))
    }

    fn description() -> &'static str {
        "Every cell is empty or a power of two of at least 2"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardSize;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_new_session_holds() {
        let session =
            GameSession::new(BoardSize::new(5).unwrap(), StdRng::seed_from_u64(5)).unwrap();
        assert!(TileValuesInvariant::holds(&session));
    }

    #[test]
    fn test_odd_value_violates() {
        let mut session =
            GameSession::new(BoardSize::new(4).unwrap(), StdRng::seed_from_u64(5)).unwrap();
        session.grid_mut().set_cell(7, 12);
        assert!(!TileValuesInvariant::holds(&session));
    }
}
