use ufmt::{uDisplay, uWrite, Formatter};
use ufmt_macros::uDebug;

use crate::input::{integer, LineTokenizer};
use crate::{Milliseconds, Position};

/// Commands accepted over the serial link.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Command {
    /// `t <target> <duration|null>`: Ramp linearly to a position.
    ///
    /// Without a duration the wiper jumps straight to the target.
    RampTo {
        target: Position,
        duration: Option<Milliseconds>,
    },
    /// `s <delta>`: Move the wiper by a number of taps.
    Step { delta: i32 },
    /// `w <duration>`: Hold the command window open.
    Wait { duration: Milliseconds },
    /// `r`: Report a measurement on the next opportunity.
    Read,
    /// `q`: Abandon everything and return to the startup state.
    Quit,
}

impl Command {
    /// Parses a line into a command.
    ///
    /// Parsing is case-insensitive. Only the checks that do not depend on the
    /// current state are made here; for example, whether a step stays in
    /// range is left to whoever applies the command.
    ///
    /// # Parameters
    ///
    /// - `line`: The line to parse.
    /// - `tok`: Tokenizer to walk the line with. It is reset before use.
    pub fn parse(
        line: &[u8],
        tok: &mut LineTokenizer,
    ) -> Result<Command, Error> {
        let command = tok
            .next_word(line, true)
            .and_then(|word| word.first())
            .map(u8::to_ascii_lowercase)
            .ok_or(Error::UnknownCommand)?;

        match command {
            b't' => {
                let target = parse_arg(tok.next_word(line, false), b't')?;
                let target = Position::new(target)
                    .ok_or(Error::Range(RangeError::Throttle))?;
                let duration = match tok.next_word(line, false) {
                    None => None,
                    Some(word) if word.eq_ignore_ascii_case(b"null") => None,
                    Some(word) => Some(parse_duration(Some(word), b't')?),
                };
                Ok(Command::RampTo { target, duration })
            }
            b's' => {
                let delta = parse_arg(tok.next_word(line, false), b's')?;
                Ok(Command::Step { delta })
            }
            b'w' => {
                let word = tok.next_word(line, false);
                let duration = parse_duration(word, b'w')?;
                Ok(Command::Wait { duration })
            }
            b'r' => Ok(Command::Read),
            b'q' => Ok(Command::Quit),
            _ => Err(Error::UnknownCommand),
        }
    }
}

/// Parses a mandatory integer argument.
fn parse_arg(word: Option<&[u8]>, command: u8) -> Result<i32, Error> {
    word.and_then(integer).ok_or(Error::Format { command })
}

/// Parses a mandatory, strictly positive duration argument.
fn parse_duration(
    word: Option<&[u8]>,
    command: u8,
) -> Result<Milliseconds, Error> {
    let value = parse_arg(word, command)?;
    if value > 0 {
        Ok(Milliseconds::new(value as u32))
    } else {
        Err(Error::Range(RangeError::Time))
    }
}

/// Reasons a command was rejected.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum Error {
    /// An argument was missing or was not an integer.
    ///
    /// `command` is the lowercase command letter.
    Format { command: u8 },
    /// An argument was an integer, but not an acceptable one.
    Range(RangeError),
    /// The line did not start with a known command letter.
    UnknownCommand,
    /// Too many commands were waiting to run.
    QueueFull,
}

/// Which range check failed.
#[derive(Debug, uDebug, PartialEq, Clone, Copy)]
pub enum RangeError {
    /// The resulting position would be outside `[0, 99]`.
    Throttle,
    /// A duration was zero or negative.
    Time,
    /// A timed ramp was requested to the position the wiper is already at.
    NoSteps,
}

/// Displays the message sent back over the serial link.
impl uDisplay for Error {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Error::Format { command } => {
                f.write_str("Bad argument for command '")?;
                f.write_char(*command as char)?;
                f.write_char('\'')
            }
            Error::Range(RangeError::Throttle) => {
                f.write_str("Throttle out of bounds")
            }
            Error::Range(RangeError::Time) => f.write_str("Time out of bounds"),
            Error::Range(RangeError::NoSteps) => {
                f.write_str("Throttle already at target")
            }
            Error::UnknownCommand => f.write_str("Unknown command type"),
            Error::QueueFull => f.write_str("Command queue full"),
        }
    }
}
