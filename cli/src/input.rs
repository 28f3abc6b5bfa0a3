use std::str::FromStr;

use anyhow::{Context, bail};
use marbles_core::{Coord, Coord2, Seed};

pub const HELP: &str = "\
commands:
  x y       click the cell in column x, row y (0 0 is the top left)
  n [seed]  start a new game, with an optional hex seed
  h         show this help
  q         quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Click(Coord2),
    NewGame(Option<Seed>),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            ["q" | "quit"] => Self::Quit,
            ["h" | "help" | "?"] => Self::Help,
            ["n" | "new"] => Self::NewGame(None),
            ["n" | "new", seed] => {
                let seed = seed.parse::<Seed>().with_context(|| format!("Invalid seed {seed:?}"))?;
                Self::NewGame(Some(seed))
            }
            [x, y] => Self::Click((coord(x)?, coord(y)?)),
            [] => bail!("Empty command"),
            _ => bail!("Unknown command {:?}", line.trim()),
        };
        Ok(command)
    }
}

fn coord(word: &str) -> anyhow::Result<Coord> {
    word.parse::<Coord>()
        .with_context(|| format!("Invalid coordinate {word:?}"))
}
