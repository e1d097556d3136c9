//! Line-oriented console frontend.
//!
//! Reads one command per line and prints the board as text after every
//! accepted command. With JSON output enabled, each snapshot is written as
//! one JSON object per line instead.

use std::io::{self, BufRead, Write};
use std::time::Duration;
use strictly_1024_engine::{
    Command, GameError, GameSession, Input, InputSource, MAX_SIDE, MIN_SIDE, Outcome, Renderer,
    Snapshot, Tile, parse_side, run,
};
use tracing::{debug, info, instrument, warn};

/// Welcome text shown before the first board.
pub const INSTRUCTIONS: &str = "Welcome to 1024.

For each move enter a direction as a letter key, as follows:
    W
  A S D
where A=left, W=up, D=right and S=down.

After a move, when two identical valued tiles come together they
join to become a new single tile with the value of the sum of the
two originals. This value gets added to the score.  On each move
one new randomly chosen value of 2 or 4 is placed in a random open
square.  Enter u to undo, r to reset and x to exit the game.
";

/// Reads commands from a line-based reader.
///
/// A bare `r` asks for the board size on the next line. Prompts are
/// written to a separate writer so JSON output stays clean.
pub struct ConsoleInput<R, W> {
    reader: R,
    prompt: W,
    awaiting_size: bool,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    /// Creates an input source over `reader`, prompting on `prompt`.
    pub fn new(reader: R, prompt: W) -> Self {
        Self {
            reader,
            prompt,
            awaiting_size: false,
        }
    }

    /// Returns the prompt writer.
    pub fn into_prompt(self) -> W {
        self.prompt
    }

    /// Next non-blank line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            if !line.trim().is_empty() {
                return Ok(Some(line.trim().to_string()));
            }
        }
    }

    /// Asks for a board size until a number is entered.
    ///
    /// Range checking is left to the session, which rejects the reset and
    /// brings the prompt back through [`InputSource::rejected`].
    fn prompt_size(&mut self) -> io::Result<Input> {
        loop {
            write!(
                self.prompt,
                "Enter the size board you want, between {} and {}: ",
                MIN_SIDE, MAX_SIDE
            )?;
            self.prompt.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(Input::Closed);
            };
            if let Some(side) = parse_side(&line) {
                return Ok(Input::Command(Command::Reset(side)));
            }
            warn!(%line, "Board size is not a number");
            writeln!(self.prompt, "Invalid input '{}', please retry.", line)?;
        }
    }
}

impl<R: BufRead, W: Write> InputSource for ConsoleInput<R, W> {
    fn next_input(&mut self) -> io::Result<Input> {
        if std::mem::take(&mut self.awaiting_size) {
            return self.prompt_size();
        }

        let Some(line) = self.read_line()? else {
            return Ok(Input::Closed);
        };

        if line.eq_ignore_ascii_case("r") {
            writeln!(self.prompt, "\nResetting board\n")?;
            return self.prompt_size();
        }

        Ok(match line.parse::<Command>() {
            Ok(command) => Input::Command(command),
            Err(_) => Input::Invalid(line),
        })
    }

    fn rejected(&mut self, command: &Command, error: &GameError) {
        if matches!(
            (command, error),
            (Command::Reset(_), GameError::InvalidConfiguration { .. })
        ) {
            debug!("Asking for the board size again");
            self.awaiting_size = true;
        }
    }
}

/// Prints snapshots as a text board or as JSON lines.
pub struct ConsoleRenderer<W> {
    out: W,
    json: bool,
    frame_delay: Duration,
    target: Option<Tile>,
    move_number: u32,
}

impl<W: Write> ConsoleRenderer<W> {
    /// Creates a text renderer with no frame delay.
    pub fn new(out: W) -> Self {
        Self {
            out,
            json: false,
            frame_delay: Duration::ZERO,
            target: None,
            move_number: 1,
        }
    }

    /// Switches to JSON-lines output.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Pauses after each frame.
    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    /// Returns the output writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn prompt(&mut self) -> io::Result<()> {
        if !self.json {
            write!(self.out, "{}. Your move: ", self.move_number)?;
        }
        self.out.flush()
    }

    fn render_text(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        if self.target != Some(*snapshot.win_tile()) {
            writeln!(self.out, "Game ends when you reach {}.", snapshot.win_tile())?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "Score: {}", snapshot.score())?;
        write!(self.out, "{}", snapshot)?;

        let list = snapshot
            .history()
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("->");
        writeln!(self.out, "List: {}", list)?;
        writeln!(self.out)?;

        match snapshot.outcome() {
            Some(Outcome::Win) => writeln!(
                self.out,
                "Congratulations!  You made it to {} !!!",
                snapshot.win_tile()
            )?,
            Some(Outcome::Loss) => {
                writeln!(self.out, "No more available moves.  Game is over.")?;
                writeln!(self.out)?;
            }
            None => {}
        }
        Ok(())
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    #[instrument(skip_all, fields(move_number = snapshot.move_number()))]
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, snapshot)?;
            writeln!(self.out)?;
        } else {
            self.render_text(snapshot)?;
        }
        self.target = Some(*snapshot.win_tile());
        self.move_number = *snapshot.move_number();
        self.prompt()?;

        if !self.frame_delay.is_zero() {
            std::thread::sleep(self.frame_delay);
        }
        Ok(())
    }

    fn notice(&mut self, error: &GameError) -> io::Result<()> {
        warn!(error = %error, "Command rejected");
        if self.json {
            let line = serde_json::json!({ "error": error.to_string() });
            serde_json::to_writer(&mut self.out, &line)?;
            writeln!(self.out)?;
            return self.out.flush();
        }

        match error {
            GameError::InvalidCommand(_) => writeln!(self.out, "{}.", error)?,
            _ => writeln!(self.out, "*** {}.  Please retry. ***", error)?,
        }
        // The input source asks for a new size itself.
        if matches!(error, GameError::InvalidConfiguration { .. }) {
            return self.out.flush();
        }
        self.prompt()
    }

    fn farewell(&mut self, _snapshot: &Snapshot) -> io::Result<()> {
        if !self.json {
            writeln!(self.out, "Thanks for playing. Exiting program...")?;
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}

/// Plays `session` on the console until exit or end of input.
///
/// # Errors
///
/// Returns an error if the terminal fails or the engine hits an
/// unrecoverable state.
#[instrument(skip_all, fields(size = %session.size()))]
pub fn play<R, P, W>(
    session: &mut GameSession,
    input: &mut ConsoleInput<R, P>,
    renderer: &mut ConsoleRenderer<W>,
) -> anyhow::Result<Snapshot>
where
    R: BufRead,
    P: Write,
    W: Write,
{
    if !renderer.json {
        write!(renderer.out, "{}", INSTRUCTIONS)?;
        writeln!(renderer.out)?;
    }

    let last = run(session, input, renderer)?;
    info!(score = last.score(), move_number = last.move_number(), "Console session finished");
    Ok(last)
}
