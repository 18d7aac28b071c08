use chess_core::Square;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Board,
    Select(Square),
    Moves(Option<Square>),
    Move(Square, Square),
    Undo,
    Status,
    History,
    Captured,
    Save(Option<String>),
    List,
    Load(String),
    Delete(String),
    New,
    Stats,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{cmd}' needs {what}")]
    MissingArg { cmd: &'static str, what: &'static str },
    #[error("'{0}' is not a square (use a1..h8)")]
    BadSquare(String),
}

pub const HELP: &str = "\
commands:
  board                 show the board
  select <sq>           select a piece and list its moves
  moves [<sq>]          legal moves of the selection or of <sq>
  move <from> <to>      play a move (also: e2e4)
  undo                  take back the last move
  status | history | captured
  save [name]           save the game under a name
  list                  list saved games
  load <id> | delete <id>
  new                   start over
  stats                 results so far
  quit";

fn square(s: &str) -> Result<Square, CommandError> {
    Square::from_algebraic(s).ok_or_else(|| CommandError::BadSquare(s.to_string()))
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Err(CommandError::Empty);
    };
    let arg = parts.get(1).copied();

    let cmd = match head.to_ascii_lowercase().as_str() {
        "board" | "b" => Command::Board,
        "select" | "s" => {
            let sq = arg.ok_or(CommandError::MissingArg {
                cmd: "select",
                what: "a square",
            })?;
            Command::Select(square(sq)?)
        }
        "moves" => Command::Moves(arg.map(square).transpose()?),
        "move" | "m" => match (arg, parts.get(2)) {
            (Some(from), Some(to)) => Command::Move(square(from)?, square(to)?),
            (Some(both), None) if both.len() == 4 && both.is_ascii() => {
                Command::Move(square(&both[..2])?, square(&both[2..])?)
            }
            _ => {
                return Err(CommandError::MissingArg {
                    cmd: "move",
                    what: "two squares",
                });
            }
        },
        "undo" | "u" => Command::Undo,
        "status" => Command::Status,
        "history" | "h" => Command::History,
        "captured" => Command::Captured,
        "save" => {
            let name = parts[1..].join(" ");
            Command::Save((!name.is_empty()).then_some(name))
        }
        "list" | "ls" => Command::List,
        "load" => Command::Load(
            arg.ok_or(CommandError::MissingArg {
                cmd: "load",
                what: "a game id",
            })?
            .to_string(),
        ),
        "delete" | "rm" => Command::Delete(
            arg.ok_or(CommandError::MissingArg {
                cmd: "delete",
                what: "a game id",
            })?
            .to_string(),
        ),
        "new" => Command::New,
        "stats" => Command::Stats,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        // bare coordinate move, e.g. "e2e4"
        other if other.len() == 4 && parts.len() == 1 && other.is_ascii() => {
            match (Square::from_algebraic(&other[..2]), Square::from_algebraic(&other[2..])) {
                (Some(from), Some(to)) => Command::Move(from, to),
                _ => return Err(CommandError::Unknown(head.to_string())),
            }
        }
        _ => return Err(CommandError::Unknown(head.to_string())),
    };
    Ok(cmd)
}
