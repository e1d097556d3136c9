//! Tests for the session state machine and undo history.

use strictly_1024_engine::{
    BoardSize, Command, Direction, GameError, GameSession, Outcome, Phase, Snapshot,
};
use strum::IntoEnumIterator;

fn session(seed: u64) -> GameSession {
    GameSession::seeded(BoardSize::new(4).expect("valid size"), seed).expect("new session")
}

/// Plays until `moves` board-changing moves were made, cycling directions.
fn play_moves(game: &mut GameSession, moves: u32) -> Vec<Snapshot> {
    let mut after_each = vec![game.snapshot()];
    let mut directions = Direction::iter().cycle();
    let mut attempts = 0;
    while game.move_number() <= moves && attempts < 1_000 {
        attempts += 1;
        let dir = directions.next().expect("cycle never ends");
        let before = game.move_number();
        game.apply(Command::Move(dir)).expect("playing");
        if game.move_number() != before {
            after_each.push(game.snapshot());
        }
        assert_eq!(game.phase(), Phase::Playing, "game ended early");
    }
    after_each
}

#[test]
fn test_undo_walks_back_to_first_move() {
    let mut game = session(12);
    let snapshots = play_moves(&mut game, 5);
    let moves = game.move_number();
    assert_eq!(moves, 6);

    for _ in 0..moves - 1 {
        game.apply(Command::Undo).expect("undo");
    }
    assert_eq!(game.move_number(), 1);
    assert_eq!(game.snapshot(), snapshots[0]);
    assert_eq!(game.apply(Command::Undo), Err(GameError::NoHistory));
}

#[test]
fn test_each_undo_matches_recorded_state() {
    let mut game = session(31);
    let snapshots = play_moves(&mut game, 4);

    for expected in snapshots.iter().rev().skip(1) {
        game.apply(Command::Undo).expect("undo");
        assert_eq!(game.grid().cells(), expected.cells().as_slice());
        assert_eq!(game.score(), *expected.score());
        assert_eq!(game.move_number(), *expected.move_number());
    }
}

#[test]
fn test_reset_after_play_starts_clean() {
    let mut game = session(77);
    play_moves(&mut game, 6);

    game.apply(Command::Reset(4)).expect("reset");
    assert_eq!(game.grid().occupied_count(), 2);
    assert_eq!(game.score(), 0);
    assert_eq!(game.move_number(), 1);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn test_snapshot_survives_later_moves() {
    let mut game = session(5);
    let before = game.snapshot();
    let cells = before.cells().clone();
    play_moves(&mut game, 3);
    assert_eq!(before.cells(), &cells);
    assert_eq!(*before.move_number(), 1);
}

#[test]
fn test_history_entries_are_independent_of_live_board() {
    let mut game = session(8);
    play_moves(&mut game, 2);
    let head = game.history().head().expect("head").clone();
    game.apply(Command::PlaceDebug { index: 0, value: 256 })
        .expect("placement");
    assert_eq!(game.history().head(), Some(&head));
    assert_eq!(game.grid().cell(0), Some(256));
    assert_eq!(game.move_number(), *head.move_number());
}

#[test]
fn test_debug_win_tile_then_move_reports_win() {
    let mut game = session(3);
    let win = game.win_tile();
    game.apply(Command::PlaceDebug { index: 15, value: win })
        .expect("placement");
    assert_eq!(game.phase(), Phase::Playing);

    let mut phase = Phase::Playing;
    for dir in Direction::iter() {
        phase = game.apply(Command::Move(dir)).expect("move");
        if phase != Phase::Playing {
            break;
        }
    }
    assert_eq!(phase, Phase::Won);
    assert_eq!(game.snapshot().outcome(), &Some(Outcome::Win));
}

#[test]
fn test_larger_board_target() {
    let game = GameSession::seeded(BoardSize::new(7).expect("size"), 1).expect("session");
    assert_eq!(game.win_tile(), 8192);
    assert_eq!(game.grid().cells().len(), 49);
}
