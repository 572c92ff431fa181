//! Command-line parsing for the interactive shell.

use crate::domain::NetworkError;
use crate::planner::SearchError;

/// Errors from parsing or running a shell command.
///
/// None of these end the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a known command
    #[error("Invalid command: {0}")]
    UnknownCommand(String),

    /// The command was given the wrong number of arguments
    #[error("Invalid format! Command should be: {usage}")]
    InvalidArgumentCount { usage: &'static str },

    /// TIME was not a non-negative integer
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// A station named by line and station name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub line: String,
    pub station: String,
}

impl Endpoint {
    pub fn new(line: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            station: station.into(),
        }
    }
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Append { line: String, station: String, time: u32 },
    AddHead { line: String, station: String, time: u32 },
    Remove { line: String, station: String },
    Connect { from: Endpoint, to: Endpoint },
    Output { line: String },
    Route { from: Endpoint, to: Endpoint },
    FastestRoute { from: Endpoint, to: Endpoint },
    Exit,
}

const APPEND_USAGE: &str = "/append LINE STATION [TIME]";
const ADD_HEAD_USAGE: &str = "/add-head LINE STATION [TIME]";
const REMOVE_USAGE: &str = "/remove LINE STATION";
const CONNECT_USAGE: &str = "/connect LINE1 STATION1 LINE2 STATION2";
const OUTPUT_USAGE: &str = "/output LINE";
const ROUTE_USAGE: &str = "/route START_LINE START_STATION END_LINE END_STATION";
const FASTEST_ROUTE_USAGE: &str = "/fastest-route START_LINE START_STATION END_LINE END_STATION";
const EXIT_USAGE: &str = "/exit";

impl Command {
    /// Parse one input line.
    ///
    /// Returns `Ok(None)` for a blank line. The keyword may be written with or
    /// without a leading `/`.
    pub fn parse_line(input: &str) -> Result<Option<Command>, CommandError> {
        let tokens = tokenize(input);
        let Some((keyword, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match keyword.strip_prefix('/').unwrap_or(keyword) {
            "append" => {
                let (line, station, time) = station_args(args, APPEND_USAGE)?;
                Command::Append { line, station, time }
            }
            "add-head" => {
                let (line, station, time) = station_args(args, ADD_HEAD_USAGE)?;
                Command::AddHead { line, station, time }
            }
            "remove" => match args {
                [line, station] => Command::Remove {
                    line: line.clone(),
                    station: station.clone(),
                },
                _ => return Err(CommandError::InvalidArgumentCount { usage: REMOVE_USAGE }),
            },
            "connect" => {
                let (from, to) = endpoint_pair(args, CONNECT_USAGE)?;
                Command::Connect { from, to }
            }
            "output" => match args {
                [line] => Command::Output { line: line.clone() },
                _ => return Err(CommandError::InvalidArgumentCount { usage: OUTPUT_USAGE }),
            },
            "route" => {
                let (from, to) = endpoint_pair(args, ROUTE_USAGE)?;
                Command::Route { from, to }
            }
            "fastest-route" => {
                let (from, to) = endpoint_pair(args, FASTEST_ROUTE_USAGE)?;
                Command::FastestRoute { from, to }
            }
            "exit" => match args {
                [] => Command::Exit,
                _ => return Err(CommandError::InvalidArgumentCount { usage: EXIT_USAGE }),
            },
            _ => return Err(CommandError::UnknownCommand(keyword.clone())),
        };

        Ok(Some(command))
    }
}

fn station_args(args: &[String], usage: &'static str) -> Result<(String, String, u32), CommandError> {
    match args {
        [line, station] => Ok((line.clone(), station.clone(), 0)),
        [line, station, time] => Ok((line.clone(), station.clone(), parse_time(time)?)),
        _ => Err(CommandError::InvalidArgumentCount { usage }),
    }
}

fn endpoint_pair(args: &[String], usage: &'static str) -> Result<(Endpoint, Endpoint), CommandError> {
    match args {
        [l1, s1, l2, s2] => Ok((Endpoint::new(l1, s1), Endpoint::new(l2, s2))),
        _ => Err(CommandError::InvalidArgumentCount { usage }),
    }
}

fn parse_time(raw: &str) -> Result<u32, CommandError> {
    raw.parse::<u32>()
        .map_err(|_| CommandError::InvalidTime(raw.to_string()))
}

/// Split an input line into words.
///
/// Words are separated by spaces. Text inside single or double quotes stays
/// together, and the other quote character is an ordinary character inside
/// it. A closing quote always ends a word, even an empty one.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut segment = String::new();
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match (ch, quote) {
            ('"' | '\'', Some(open)) if ch == open => {
                parts.push(std::mem::take(&mut segment));
                quote = None;
            }
            ('"' | '\'', None) => quote = Some(ch),
            (' ' | '\t' | '\r' | '\n', None) => {
                if !segment.is_empty() {
                    parts.push(std::mem::take(&mut segment));
                }
            }
            _ => segment.push(ch),
        }
    }

    if !segment.is_empty() {
        parts.push(segment);
    }

    parts
}
