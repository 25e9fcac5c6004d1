use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(Coord2),
    OpenAround(Coord2),
    ToggleFlag(Coord2),
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command `{0}`, type `h` for help")]
    Unknown(String),
    #[error("`{0}` expects a row and a column")]
    MissingCoords(String),
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
    #[error("Unexpected trailing input `{0}`")]
    Trailing(String),
}

pub const HELP: &str = "\
Commands:
  o <row> <col>   open a cell
  a <row> <col>   open the cells around an opened cell
  f <row> <col>   set or remove a flag
  n               start a new game
  h               show this help
  q               quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "o" | "open" => Self::Open(parse_coords(name, &mut words)?),
            "a" | "around" => Self::OpenAround(parse_coords(name, &mut words)?),
            "f" | "flag" => Self::ToggleFlag(parse_coords(name, &mut words)?),
            "n" | "new" => Self::NewGame,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    name: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let (Some(row), Some(col)) = (words.next(), words.next()) else {
        return Err(CommandError::MissingCoords(name.to_owned()));
    };
    Ok((parse_coord(row)?, parse_coord(col)?))
}

fn parse_coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_with_coordinates() {
        assert_eq!("o 1 2".parse::<Command>(), Ok(Command::Open((1, 2))));
        assert_eq!("around 0 0".parse::<Command>(), Ok(Command::OpenAround((0, 0))));
        assert_eq!("  F   3 4 ".parse::<Command>(), Ok(Command::ToggleFlag((3, 4))));
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!("n".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("help".parse::<Command>(), Ok(Command::Help));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "x 1 1".parse::<Command>(),
            Err(CommandError::Unknown("x".into()))
        );
        assert_eq!(
            "o 1".parse::<Command>(),
            Err(CommandError::MissingCoords("o".into()))
        );
        assert_eq!(
            "f 1 -2".parse::<Command>(),
            Err(CommandError::InvalidCoord("-2".into()))
        );
        assert_eq!(
            "o 1 300".parse::<Command>(),
            Err(CommandError::InvalidCoord("300".into()))
        );
        assert_eq!(
            "n now".parse::<Command>(),
            Err(CommandError::Trailing("now".into()))
        );
    }
}
