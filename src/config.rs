//! Game configuration loaded from TOML and overridden by CLI flags.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_1024_engine::{BoardSize, GameError, GameSession};
use tracing::{debug, info, instrument};

/// Settings shared by both frontends.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the starting board.
    #[serde(default)]
    board_size: BoardSize,

    /// Seed for tile spawning; `None` draws one from the OS.
    #[serde(default)]
    seed: Option<u64>,

    /// Pause after each rendered frame, in milliseconds.
    #[serde(default = "default_frame_delay_ms")]
    frame_delay_ms: u64,

    /// Emit console snapshots as JSON lines instead of the text board.
    #[serde(default)]
    json: bool,
}

fn default_frame_delay_ms() -> u64 {
    10
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BoardSize::default(),
            seed: None,
            frame_delay_ms: default_frame_delay_ms(),
            json: false,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(board_size = %config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies command-line overrides on top of file values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `board_size` is outside 4..=12.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        board_size: Option<u8>,
        seed: Option<u64>,
        json: bool,
    ) -> Result<Self, ConfigError> {
        if let Some(side) = board_size {
            self.board_size =
                BoardSize::new(side).map_err(|e| ConfigError::new(e.to_string()))?;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self.json |= json;
        Ok(self)
    }

    /// Starts a session on the configured board, seeded if a seed is set.
    #[instrument(skip(self), fields(board_size = %self.board_size, seed = ?self.seed))]
    pub fn session(&self) -> Result<GameSession, GameError> {
        match self.seed {
            Some(seed) => GameSession::seeded(self.board_size, seed),
            None => GameSession::from_entropy(self.board_size),
        }
    }

    /// Sets the frame delay.
    pub fn with_frame_delay_ms(mut self, frame_delay_ms: u64) -> Self {
        self.frame_delay_ms = frame_delay_ms;
        self
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
