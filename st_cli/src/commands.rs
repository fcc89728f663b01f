use std::fmt;

/// Text printed by the `help` command.
pub const COMMAND_HELP: &str = "\
Registration:
  add NAME[, NAME...]     Register participants (comma separated)
  remove N                Remove participant N (see 'list')
  list                    Show the roster with numbers
  start                   Close registration and pair round 1

Rounds:
  show                    Show the current round's tables
  rank TABLE SEAT RANK    Record a finish rank (1 = winner)
  unrank TABLE SEAT       Clear a recorded rank
  bonus N DELTA           Add DELTA to participant N's bonus
  setbonus N VALUE        Set participant N's bonus
  next                    Close the round and pair the next one
  next!                   Close the round even with unscored seats
  standings               Show the standings

Narrative:
  hype                    Announce the current round
  report                  Final report once the tournament is over

Other:
  reset                   Ask to discard the tournament
  reset!                  Discard the tournament and start over
  help                    Show this help
  quit                    Leave (state is saved after every change)
";

/// A parsed console command.
///
/// Participant, table and seat numbers are 1-based, matching what `list`
/// and `show` print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<String>),
    Remove(usize),
    List,
    Start,
    Show,
    Rank { table: usize, seat: usize, rank: u8 },
    Unrank { table: usize, seat: usize },
    Bonus { participant: usize, delta: i64 },
    SetBonus { participant: usize, value: i64 },
    Next { force: bool },
    Standings,
    Hype,
    Report,
    Reset { confirmed: bool },
    Help,
    Quit,
}

impl Command {
    /// Whether running this command can change tournament state
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Add(_)
                | Self::Remove(_)
                | Self::Start
                | Self::Rank { .. }
                | Self::Unrank { .. }
                | Self::Bonus { .. }
                | Self::SetBonus { .. }
                | Self::Next { .. }
                | Self::Reset { confirmed: true }
        )
    }
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Command is missing one or more arguments.
    MissingArgument { usage: &'static str },
    /// Argument is not a valid number.
    InvalidNumber(String),
    /// Number must be 1 or more.
    ZeroIndex,
    /// `add` with no names.
    NoNames,
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { usage } => write!(f, "Missing argument. Usage: '{}'", usage),
            Self::InvalidNumber(value) => write!(f, "Invalid number '{}'", value),
            Self::ZeroIndex => write!(f, "Numbers start at 1"),
            Self::NoNames => write!(f, "Add requires at least one name (e.g., 'add Ana, Ben')"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a command string into a [`Command`].
///
/// # Examples
///
/// ```
/// use st_cli::commands::{Command, parse_command};
///
/// assert_eq!(parse_command("next!"), Ok(Command::Next { force: true }));
/// assert_eq!(
///     parse_command("rank 2 1 3"),
///     Ok(Command::Rank { table: 2, seat: 1, rank: 3 })
/// );
/// assert_eq!(
///     parse_command("add Ana, Ben Cole"),
///     Ok(Command::Add(vec!["Ana".to_string(), "Ben Cole".to_string()]))
/// );
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "list" => return Ok(Command::List),
        "start" => return Ok(Command::Start),
        "show" => return Ok(Command::Show),
        "next" => return Ok(Command::Next { force: false }),
        "next!" => return Ok(Command::Next { force: true }),
        "standings" => return Ok(Command::Standings),
        "hype" => return Ok(Command::Hype),
        "report" => return Ok(Command::Report),
        "reset" => return Ok(Command::Reset { confirmed: false }),
        "reset!" => return Ok(Command::Reset { confirmed: true }),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    // Parse multi-word commands
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"add") => parse_add_command(trimmed),
        Some(&"remove") => Ok(Command::Remove(index_arg(&parts, 1, "remove N")?)),
        Some(&"rank") => Ok(Command::Rank {
            table: index_arg(&parts, 1, "rank TABLE SEAT RANK")?,
            seat: index_arg(&parts, 2, "rank TABLE SEAT RANK")?,
            rank: number_arg(&parts, 3, "rank TABLE SEAT RANK")?,
        }),
        Some(&"unrank") => Ok(Command::Unrank {
            table: index_arg(&parts, 1, "unrank TABLE SEAT")?,
            seat: index_arg(&parts, 2, "unrank TABLE SEAT")?,
        }),
        Some(&"bonus") => Ok(Command::Bonus {
            participant: index_arg(&parts, 1, "bonus N DELTA")?,
            delta: number_arg(&parts, 2, "bonus N DELTA")?,
        }),
        Some(&"setbonus") => Ok(Command::SetBonus {
            participant: index_arg(&parts, 1, "setbonus N VALUE")?,
            value: number_arg(&parts, 2, "setbonus N VALUE")?,
        }),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse "add NAME[, NAME...]"; names may contain spaces
fn parse_add_command(trimmed: &str) -> Result<Command, ParseError> {
    let rest = trimmed.strip_prefix("add").unwrap_or_default();
    let names: Vec<String> = rest
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(ParseError::NoNames);
    }
    Ok(Command::Add(names))
}

fn number_arg<T: std::str::FromStr>(
    parts: &[&str],
    position: usize,
    usage: &'static str,
) -> Result<T, ParseError> {
    let value = parts
        .get(position)
        .ok_or(ParseError::MissingArgument { usage })?;
    value
        .parse()
        .map_err(|_| ParseError::InvalidNumber(value.to_string()))
}

/// 1-based number argument
fn index_arg(parts: &[&str], position: usize, usage: &'static str) -> Result<usize, ParseError> {
    match number_arg(parts, position, usage)? {
        0 => Err(ParseError::ZeroIndex),
        n => Ok(n),
    }
}
