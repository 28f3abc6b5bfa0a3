use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;
use marbles_core::{ClickOutcome, Coord, Game, GameError};

use crate::input::{Command, HELP};
use crate::render::TextFrontend;
use crate::settings::{Settings, random_seed};

mod input;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Clear same-colored regions of marbles", long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with settings, flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board side length
    #[arg(long)]
    side: Option<Coord>,

    /// Number of colors, up to 8
    #[arg(long)]
    colors: Option<u8>,

    /// Force a hex seed instead of random
    #[arg(short, long)]
    seed: Option<String>,

    /// Pause after every settling swap
    #[arg(long, value_name = "ms")]
    step_delay_ms: Option<u64>,

    /// Reprint the board after every settling swap
    #[arg(long)]
    animate: bool,

    /// Print a JSON snapshot after every completed action
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = Settings::from_args(&args)?;
    let mut frontend = TextFrontend::new(settings.game.side, &settings);
    let mut game = Game::new(settings.game);

    let seed = settings.seed.unwrap_or_else(random_seed);
    game.new_game(seed, &mut frontend)?;
    println!("seed {seed}, type h for help");
    frontend.show(&game)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}, type h for help");
                continue;
            }
        };
        log::debug!("{command:?}");

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::NewGame(seed) => {
                let seed = seed.unwrap_or_else(random_seed);
                game.new_game(seed, &mut frontend)?;
                println!("seed {seed}");
                frontend.show(&game)?;
            }
            Command::Click(coords) => {
                let was_running = game.session().is_running();
                let outcome = match game.click(coords, &mut frontend) {
                    Ok(outcome) => outcome,
                    Err(GameError::InvalidCoords) => {
                        log::debug!("{coords:?} outside the board, ignored");
                        println!("{} {} is outside the board", coords.0, coords.1);
                        continue;
                    }
                    Err(GameError::NotRunning) => {
                        println!("game over, type n for a new game");
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                };
                if let ClickOutcome::Cleared { size, points } = outcome {
                    let swaps = game.settle(&mut frontend);
                    log::debug!("cleared {size} for {points} points, settled in {swaps} swaps");
                }
                if !outcome.has_update() {
                    if outcome == ClickOutcome::NoMatch {
                        println!("nothing to match at {} {}", coords.0, coords.1);
                    }
                    continue;
                }
                frontend.show(&game)?;
                if was_running && !game.session().is_running() {
                    print_result(&game);
                }
            }
        }
    }
    Ok(())
}

fn print_result(game: &Game) {
    let score = game.session().score();
    if game.has_won() {
        println!("board cleared, final score {score}");
    } else {
        println!("no moves left, final score {score}");
    }
    println!("type n for a new game or q to quit");
}
