use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::args::parsers::parse_point;
use crate::domain::Coordinate;
use crate::error::ValidationError;
use crate::map::ClickRelay;

pub(crate) const HELP_TEXT: &str = "\
Commands:
  line <id>           follow a bus line (e.g. line 483)
  search              refresh the current line now
  click <lat> <lng>   set your start point on the map
  email <address>     set the alert email
  alert               register an arrival alert
  status              print the current view
  help                show this list
  quit                exit";

/// Actions the session loop reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    SelectLine(String),
    Search,
    Email(String),
    SubmitAlert,
    Status,
    Quit,
}

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Input {
    Command(Command),
    Click(Coordinate),
    Help,
    Empty,
}

pub(crate) fn parse_input(line: &str) -> Result<Input, ValidationError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "" => Input::Empty,
        "line" => Input::Command(Command::SelectLine(required(rest, "line", "a line id")?)),
        "search" | "refresh" => Input::Command(Command::Search),
        "click" => Input::Click(parse_click(rest)?),
        "email" => Input::Command(Command::Email(required(rest, "email", "an address")?)),
        "alert" => Input::Command(Command::SubmitAlert),
        "status" => Input::Command(Command::Status),
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Command(Command::Quit),
        other => {
            return Err(ValidationError::UnknownCommand {
                value: other.to_owned(),
            });
        }
    };
    Ok(input)
}

fn required(
    rest: &str,
    command: &'static str,
    expected: &'static str,
) -> Result<String, ValidationError> {
    if rest.is_empty() {
        return Err(ValidationError::MissingCommandArgument { command, expected });
    }
    Ok(rest.to_owned())
}

/// Accepts `lat lng` as well as `lat,lng`.
fn parse_click(rest: &str) -> Result<Coordinate, ValidationError> {
    if rest.is_empty() {
        return Err(ValidationError::MissingCommandArgument {
            command: "click",
            expected: "a latitude and a longitude",
        });
    }
    if rest.contains(',') {
        return parse_point(rest);
    }
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [lat, lng] => parse_point(&format!("{},{}", lat, lng)),
        _ => Err(ValidationError::InvalidCoordinateFormat {
            value: rest.to_owned(),
        }),
    }
}

/// Reads commands until input ends or `quit` is typed. Clicks go through the
/// map's click relay so they reach the view the same way a pointer click would.
pub(crate) async fn read_commands<R>(reader: R, commands: mpsc::Sender<Command>, relay: ClickRelay)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("Input closed");
                break;
            }
            Err(err) => {
                warn!("Failed to read input: {}", err);
                break;
            }
        };

        match parse_input(&line) {
            Ok(Input::Empty) => {}
            Ok(Input::Help) => println!("{}", HELP_TEXT),
            Ok(Input::Click(coordinate)) => {
                if !relay.click(coordinate) {
                    warn!("Map is not accepting clicks");
                }
            }
            Ok(Input::Command(command)) => {
                let quit = command == Command::Quit;
                if commands.send(command).await.is_err() || quit {
                    break;
                }
            }
            Err(err) => warn!("{}", err),
        }
    }
}
