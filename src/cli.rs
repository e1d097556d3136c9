//! Command-line interface for strictly_1024.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly 1024 - sliding-tile merge puzzle
#[derive(Parser, Debug)]
#[command(name = "strictly_1024")]
#[command(about = "Sliding-tile merge puzzle for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play line by line on stdin/stdout
    Console {
        /// Board side length (4-12)
        #[arg(short, long)]
        size: Option<u8>,

        /// Seed for tile spawning
        #[arg(long)]
        seed: Option<u64>,

        /// Emit each snapshot as a JSON line
        #[arg(long)]
        json: bool,

        /// Pause after each frame, in milliseconds
        #[arg(long)]
        frame_delay_ms: Option<u64>,
    },

    /// Play in the full-screen terminal UI
    Tui {
        /// Board side length (4-12)
        #[arg(short, long)]
        size: Option<u8>,

        /// Seed for tile spawning
        #[arg(long)]
        seed: Option<u64>,
    },
}
