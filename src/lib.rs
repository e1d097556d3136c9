//! Strictly 1024 - console and terminal frontends for the 1024 puzzle
//!
//! The rules live in [`strictly_1024_engine`]; this crate wires them to a
//! player.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Console**: line-based play on stdin/stdout, optionally as JSON lines
//! - **TUI**: full-screen ratatui board driven by the keyboard
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use strictly_1024::{ConsoleInput, ConsoleRenderer, GameConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = GameConfig::default().with_overrides(Some(4), Some(1), false)?;
//! let mut session = config.session()?;
//! let mut input = ConsoleInput::new(Cursor::new("a\nx\n"), std::io::sink());
//! let mut renderer = ConsoleRenderer::new(Vec::new());
//! strictly_1024::console::play(&mut session, &mut input, &mut renderer)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod tui;

pub use config::{ConfigError, GameConfig};
pub use console::{ConsoleInput, ConsoleRenderer, INSTRUCTIONS};
pub use strictly_1024_engine as engine;
