//! Command loop between an input source, a session and a renderer.
//!
//! The engine never touches a terminal. Frontends implement the two
//! collaborator traits below and [`run`] moves one command at a time
//! through the session: read, apply, publish.

use crate::{Command, GameError, GameSession, Phase, Snapshot};
use derive_more::{Display, Error, From};
use tracing::{debug, error, info, instrument, warn};

/// One read from an input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A well-formed command.
    Command(Command),
    /// Text that does not name a command.
    Invalid(String),
    /// The source has nothing more to give.
    Closed,
}

/// Produces commands, one per call.
pub trait InputSource {
    /// Blocks until the next command is available.
    fn next_input(&mut self) -> std::io::Result<Input>;

    /// Told when the session refused a command, so the source can re-prompt.
    fn rejected(&mut self, _command: &Command, _error: &GameError) {}
}

/// Presents session state to the player.
pub trait Renderer {
    /// Shows a snapshot published after an accepted command.
    fn render(&mut self, snapshot: &Snapshot) -> std::io::Result<()>;

    /// Shows a recoverable error; the session did not change.
    fn notice(&mut self, error: &GameError) -> std::io::Result<()>;

    /// Called once when the session exits.
    fn farewell(&mut self, _snapshot: &Snapshot) -> std::io::Result<()> {
        Ok(())
    }
}

/// Failure that stops the command loop.
#[derive(Debug, Display, Error, From)]
pub enum DriverError {
    /// Reading input or writing output failed.
    #[display("Frontend I/O failed: {_0}")]
    Io(std::io::Error),
    /// The session hit an unrecoverable engine error.
    #[display("Engine failure: {_0}")]
    Engine(GameError),
}

/// Drives `session` until it exits or the input closes; returns the final snapshot.
///
/// The current state is rendered once before the first read. After that a
/// snapshot is published for every accepted command except `Exit`, and
/// recoverable errors go to [`Renderer::notice`] without touching the state.
///
/// # Errors
///
/// Returns `DriverError::Io` when the frontend fails and
/// `DriverError::Engine` for errors the session cannot recover from.
#[instrument(skip_all, fields(size = %session.size()))]
pub fn run<I, R>(
    session: &mut GameSession,
    input: &mut I,
    renderer: &mut R,
) -> Result<Snapshot, DriverError>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    info!("Starting command loop");
    renderer.render(&session.snapshot())?;

    loop {
        let command = match input.next_input()? {
            Input::Command(command) => command,
            Input::Invalid(token) => {
                warn!(%token, "Unrecognized input");
                renderer.notice(&GameError::InvalidCommand(token))?;
                continue;
            }
            Input::Closed => {
                info!("Input closed");
                break;
            }
        };

        debug!(%command, "Applying command");
        match session.apply(command) {
            Ok(Phase::Exited) => {
                renderer.farewell(&session.snapshot())?;
                break;
            }
            Ok(_) => renderer.render(&session.snapshot())?,
            Err(e) if e.is_recoverable() => {
                input.rejected(&command, &e);
                renderer.notice(&e)?;
            }
            Err(e) => {
                error!(error = %e, "Unrecoverable engine error");
                return Err(e.into());
            }
        }
    }

    Ok(session.snapshot())
}
