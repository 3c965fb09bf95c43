//! Command-line parsing for the `bc` binary.

use beach_club::bags::Side;
use chrono::NaiveDate;
use pico_args::Arguments;
use std::ffi::OsString;

/// Default number of events shown by `upcoming`
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Errors that can occur during command parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("No command given. Run 'bc --help' to see available commands")]
    MissingCommand,

    #[error("Unrecognized command '{0}'. Run 'bc --help' to see available commands")]
    UnrecognizedCommand(String),

    #[error("Invalid side '{0}'. Use 'player1' or 'player2'")]
    InvalidSide(String),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unexpected arguments: {0:?}")]
    UnexpectedArguments(Vec<OsString>),

    #[error(transparent)]
    Args(#[from] pico_args::Error),
}

/// Top-level command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Events dated today or later
    Upcoming { limit: usize },
    /// Every event in load order
    Events,
    /// Force a reload of all sources
    Refresh,
    Tournament(TournamentCommand),
    Schedule(ScheduleCommand),
}

/// Live bracket commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentCommand {
    New { size: u8 },
    Add { name: String },
    Start,
    Score {
        match_id: String,
        side: Side,
        delta: i32,
    },
    Advance,
    Show,
    Reset { size: Option<u8> },
}

/// Calendar entries for upcoming tournaments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleCommand {
    Add {
        name: String,
        date: NaiveDate,
        time: Option<String>,
        size: u8,
        description: Option<String>,
    },
    Remove { id: String },
}

/// Parse the remaining arguments into a [`Command`].
///
/// Options are read before positional arguments, and anything left over
/// is an error.
///
/// # Examples
///
/// ```
/// use bc_cli::commands::{Command, parse_command};
/// use pico_args::Arguments;
///
/// let args = Arguments::from_vec(vec!["upcoming".into(), "--limit".into(), "3".into()]);
/// assert_eq!(parse_command(args).unwrap(), Command::Upcoming { limit: 3 });
/// ```
pub fn parse_command(mut args: Arguments) -> Result<Command, ParseError> {
    let command = match args.subcommand()?.as_deref() {
        Some("upcoming") => Command::Upcoming {
            limit: args
                .opt_value_from_str("--limit")?
                .unwrap_or(DEFAULT_UPCOMING_LIMIT),
        },
        Some("events") => Command::Events,
        Some("refresh") => Command::Refresh,
        Some("tournament") => Command::Tournament(parse_tournament(&mut args)?),
        Some("schedule") => Command::Schedule(parse_schedule(&mut args)?),
        Some(other) => return Err(ParseError::UnrecognizedCommand(other.to_string())),
        None => return Err(ParseError::MissingCommand),
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(ParseError::UnexpectedArguments(rest));
    }
    Ok(command)
}

fn parse_tournament(args: &mut Arguments) -> Result<TournamentCommand, ParseError> {
    let command = match args.subcommand()?.as_deref() {
        Some("new") => TournamentCommand::New {
            size: args.value_from_str("--size")?,
        },
        Some("add") => TournamentCommand::Add {
            name: args.free_from_str()?,
        },
        Some("start") => TournamentCommand::Start,
        Some("score") => {
            let match_id = args.free_from_str()?;
            let side: String = args.free_from_str()?;
            let side = side.parse().map_err(|_| ParseError::InvalidSide(side))?;
            TournamentCommand::Score {
                match_id,
                side,
                delta: args.free_from_str()?,
            }
        }
        Some("advance") => TournamentCommand::Advance,
        Some("show") => TournamentCommand::Show,
        Some("reset") => TournamentCommand::Reset {
            size: args.opt_value_from_str("--size")?,
        },
        Some(other) => {
            return Err(ParseError::UnrecognizedCommand(format!("tournament {other}")));
        }
        None => return Err(ParseError::MissingCommand),
    };
    Ok(command)
}

fn parse_schedule(args: &mut Arguments) -> Result<ScheduleCommand, ParseError> {
    let command = match args.subcommand()?.as_deref() {
        Some("add") => {
            let date: String = args.value_from_str("--date")?;
            ScheduleCommand::Add {
                name: args.value_from_str("--name")?,
                date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|_| ParseError::InvalidDate(date))?,
                time: args.opt_value_from_str("--time")?,
                size: args.opt_value_from_str("--size")?.unwrap_or(4),
                description: args.opt_value_from_str("--description")?,
            }
        }
        Some("remove") => ScheduleCommand::Remove {
            id: args.free_from_str()?,
        },
        Some(other) => {
            return Err(ParseError::UnrecognizedCommand(format!("schedule {other}")));
        }
        None => return Err(ParseError::MissingCommand),
    };
    Ok(command)
}
