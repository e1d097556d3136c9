//! Strictly 1024 - Unified CLI

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::Path;
use std::time::Duration;
use strictly_1024::cli::{Cli, Command};
use strictly_1024::{ConsoleInput, ConsoleRenderer, GameConfig, console, tui};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let file_config = cli.config.as_deref();

    match cli.command {
        Command::Console {
            size,
            seed,
            json,
            frame_delay_ms,
        } => run_console(file_config, size, seed, json, frame_delay_ms),
        Command::Tui { size, seed } => run_tui(file_config, size, seed),
    }
}

/// Loads the config file (if any) and applies CLI overrides.
fn load_config(
    path: Option<&Path>,
    size: Option<u8>,
    seed: Option<u64>,
    json: bool,
) -> Result<GameConfig> {
    let config = GameConfig::load(path).context("Failed to load config")?;
    config
        .with_overrides(size, seed, json)
        .context("Invalid command-line override")
}

/// Play on stdin/stdout
#[instrument(skip_all)]
fn run_console(
    path: Option<&Path>,
    size: Option<u8>,
    seed: Option<u64>,
    json: bool,
    frame_delay_ms: Option<u64>,
) -> Result<()> {
    initialize_console_tracing();

    let mut config = load_config(path, size, seed, json)?;
    if let Some(delay) = frame_delay_ms {
        config = config.with_frame_delay_ms(delay);
    }
    info!(board_size = %config.board_size(), json = config.json(), "Starting console game");

    let mut session = config.session().context("Failed to start game")?;
    let prompt: Box<dyn io::Write> = if *config.json() {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };
    let mut input = ConsoleInput::new(io::stdin().lock(), prompt);
    let mut renderer = ConsoleRenderer::new(io::stdout())
        .with_json(*config.json())
        .with_frame_delay(Duration::from_millis(*config.frame_delay_ms()));

    console::play(&mut session, &mut input, &mut renderer)?;
    Ok(())
}

/// Play in the terminal UI
#[instrument(skip_all)]
fn run_tui(path: Option<&Path>, size: Option<u8>, seed: Option<u64>) -> Result<()> {
    initialize_tui_tracing()?;

    let config = load_config(path, size, seed, false)?;
    let mut session = config.session().context("Failed to start game")?;
    let last = tui::run_tui(
        &mut session,
        Duration::from_millis(*config.frame_delay_ms()),
    )?;

    println!(
        "Final score {} after {} moves.",
        last.score(),
        last.move_number().saturating_sub(1)
    );
    Ok(())
}

/// Console logs go to stderr so they never mix with the board.
fn initialize_console_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,strictly_1024=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Console tracing initialized");
}

/// Logs to a file to avoid interfering with the TUI.
fn initialize_tui_tracing() -> Result<()> {
    let log_file = std::fs::File::create("strictly_1024_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!("TUI tracing initialized");
    Ok(())
}
