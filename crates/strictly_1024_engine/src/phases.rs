//! Controller phases and game outcomes.

use serde::{Deserialize, Serialize};

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A tile reached the target value.
    Win,
    /// The board is full and no move changes it.
    Loss,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Loss => write!(f, "Loss"),
        }
    }
}

/// State of the game controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Commands move the board.
    #[default]
    Playing,
    /// Target tile reached; only reset and exit are accepted.
    Won,
    /// No move left; only reset and exit are accepted.
    Lost,
    /// Session closed; nothing is accepted.
    Exited,
}

impl Phase {
    /// Returns the outcome for finished phases.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Phase::Won => Some(Outcome::Win),
            Phase::Lost => Some(Outcome::Loss),
            Phase::Playing | Phase::Exited => None,
        }
    }

    /// Returns true once the game was won or lost.
    pub fn is_finished(self) -> bool {
        self.outcome().is_some()
    }
}

impl From<Outcome> for Phase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Phase::Won,
            Outcome::Loss => Phase::Lost,
        }
    }
}
