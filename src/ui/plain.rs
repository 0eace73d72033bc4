use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::PlayError;
use crate::game::{Command, Game, Outcome};

/// Line-based play: one move character per line, the board printed after
/// every accepted move. Unreadable or refused moves just prompt again.
///
/// Returns when the game ends or the input runs out.
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    mut output: W,
) -> Result<Outcome, PlayError> {
    write!(output, "{}", game.board())?;
    let mut lines = input.lines();

    loop {
        writeln!(output, "{}: ", game.current_turn().name())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            return Ok(game.outcome());
        };
        let line = line?;
        let Some(command) = line.chars().next().and_then(Command::parse) else {
            debug!(input = %line, "unrecognised move");
            continue;
        };
        if !game.apply(command)? {
            debug!(?command, "move refused");
            continue;
        }

        write!(output, "{}", game.board())?;
        let outcome = game.outcome();
        if let Some(text) = outcome.message() {
            writeln!(output, "{text}")?;
            return Ok(outcome);
        }
    }
}
