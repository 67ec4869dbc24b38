use chunklife_core::Pattern;
use thiserror::Error;

/// One line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Toggle the cell under a canvas pixel
    Toggle { x: i32, y: i32 },
    /// Advance a number of generations by hand
    Step(u32),
    Clear,
    Run,
    Stop,
    /// Place a pattern at a global cell coordinate
    Seed {
        pattern: &'static Pattern,
        x: i32,
        y: i32,
    },
    Show,
    Patterns,
    Json,
    Help,
    Quit,
}

/// Most generations a single `step` command may run
pub const MAX_STEPS: u32 = 1000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{argument}: expected a number, got {value:?}")]
    InvalidNumber {
        argument: &'static str,
        value: String,
    },

    #[error("{argument}: at most {max}, got {value}")]
    OutOfRange {
        argument: &'static str,
        value: u32,
        max: u32,
    },

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

pub const HELP: &str = "\
commands:
  toggle <px> <py>        toggle the cell under a canvas pixel
  step [n]                advance n generations (default 1, at most 1000)
  clear                   kill every cell
  run | stop              start or stop the timer
  seed <pattern> <x> <y>  place a pattern at a cell coordinate
  show                    print the grid
  patterns                list pattern names
  json                    print a snapshot as JSON
  quit";

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "toggle" | "t" => Command::Toggle {
            x: number(words.next(), "toggle", "px")?,
            y: number(words.next(), "toggle", "py")?,
        },
        "step" | "s" => match words.next() {
            Some(raw) => match parse_number(raw, "n")? {
                n if n <= MAX_STEPS => Command::Step(n),
                n => {
                    return Err(CommandError::OutOfRange {
                        argument: "n",
                        value: n,
                        max: MAX_STEPS,
                    })
                }
            },
            None => Command::Step(1),
        },
        "clear" => Command::Clear,
        "run" | "start" => Command::Run,
        "stop" => Command::Stop,
        "seed" => {
            let name = words.next().ok_or(CommandError::MissingArgument {
                command: "seed",
                argument: "pattern",
            })?;
            let pattern = Pattern::by_name(name)
                .ok_or_else(|| CommandError::UnknownPattern(name.to_string()))?;
            Command::Seed {
                pattern,
                x: number(words.next(), "seed", "x")?,
                y: number(words.next(), "seed", "y")?,
            }
        }
        "show" => Command::Show,
        "patterns" => Command::Patterns,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn number<T: std::str::FromStr>(
    word: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<T, CommandError> {
    let raw = word.ok_or(CommandError::MissingArgument { command, argument })?;
    parse_number(raw, argument)
}

fn parse_number<T: std::str::FromStr>(raw: &str, argument: &'static str) -> Result<T, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        argument,
        value: raw.to_string(),
    })
}
