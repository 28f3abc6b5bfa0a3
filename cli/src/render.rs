use std::fmt::Write as _;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use marbles_core::{Cell, Coord, Coord2, Dims, Frontend, Game, Snapshot};

use crate::settings::Settings;

const GLYPHS: [char; 8] = ['r', 'g', 'b', 'y', 'm', 'c', 'w', 'o'];

pub fn glyph(cell: Cell) -> char {
    match cell.color_of() {
        None => '.',
        Some(color) => {
            let glyph = GLYPHS[usize::from(color)];
            if cell.is_selected() {
                glyph.to_ascii_uppercase()
            } else {
                glyph
            }
        }
    }
}

/// Plain text rendition of the board, kept up to date through [`Frontend::draw`].
pub struct TextFrontend {
    dims: Dims,
    glyphs: Vec<char>,
    step_delay: Duration,
    animate: bool,
    json: bool,
}

impl TextFrontend {
    pub fn new(side: Coord, settings: &Settings) -> Self {
        let dims = Dims::new(side);
        Self {
            dims,
            glyphs: vec![glyph(Cell::EMPTY); dims.len()],
            step_delay: Duration::from_millis(settings.step_delay_ms),
            animate: settings.animate,
            json: settings.json,
        }
    }

    /// The board with a column ruler on top and row numbers on the left.
    pub fn board(&self) -> String {
        let side = usize::from(self.dims.side());
        let mut out = String::with_capacity((side + 5) * (side + 1));
        out.push_str("    ");
        for x in 0..side {
            // last digit only, the row labels carry the full number
            out.push(char::from(b'0' + (x % 10) as u8));
        }
        out.push('\n');
        for (y, row) in self.glyphs.chunks(side).enumerate() {
            let _ = write!(out, "{y:>3} ");
            out.extend(row);
            out.push('\n');
        }
        out
    }

    pub fn status(&self, game: &Game) -> String {
        let snapshot = game.snapshot();
        let mut status = format!("score {}", snapshot.score);
        if snapshot.selection_size > 0 {
            let _ = write!(
                status,
                ", selected {} worth {}",
                snapshot.selection_size, snapshot.potential_score
            );
        }
        status
    }

    pub fn show(&self, game: &Game) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", self.board())?;
        writeln!(stdout, "{}", self.status(game))?;
        stdout.flush()
    }

    fn emit(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        if let Err(err) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
            log::warn!("Could not write to stdout: {err}");
        }
    }
}

impl Frontend for TextFrontend {
    fn draw(&mut self, coords: Coord2, cell: Cell) {
        match self.dims.to_index(coords) {
            Some(index) => self.glyphs[index] = glyph(cell),
            None => log::warn!("draw outside the board at {coords:?}"),
        }
    }

    fn pace(&mut self) {
        if !self.step_delay.is_zero() {
            thread::sleep(self.step_delay);
        }
        if self.animate {
            let mut frame = self.board();
            frame.push('\n');
            self.emit(&frame);
        }
    }

    fn report(&mut self, snapshot: &Snapshot) {
        log::debug!("{snapshot:?}");
        if self.json {
            match serde_json::to_string(snapshot) {
                Ok(line) => self.emit(&(line + "\n")),
                Err(err) => log::warn!("Could not serialize snapshot: {err}"),
            }
        }
    }
}
