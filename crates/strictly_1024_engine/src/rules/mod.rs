//! Game rules for the sliding-tile puzzle.
//!
//! Pure functions over a [`Grid`](crate::Grid). Rules are separated from the
//! session so the terminal detector can replay moves on scratch boards and
//! tests can drive each rule on hand-built grids.

pub mod setup;
pub mod slide;
pub mod spawn;
pub mod terminal;

pub use setup::{BASE_TARGET, init_board, win_tile};
pub use slide::{MoveResult, slide, slide_down, slide_left, slide_right, slide_up};
pub use spawn::spawn_random_tile;
pub use terminal::{evaluate, has_any_move, is_game_over};
