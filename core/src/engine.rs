use serde::{Deserialize, Serialize};

use crate::*;

/// Host side of a running game: receives cell updates, pacing points, and diagnostics.
pub trait Frontend {
    /// Called after every change to the cell at `coords`.
    fn draw(&mut self, coords: Coord2, cell: Cell);

    /// Suspension point after each settling swap.
    fn pace(&mut self) {}

    /// Read-only diagnostics, once per completed action.
    fn report(&mut self, _snapshot: &Snapshot) {}
}

/// Frontend that ignores every call.
#[derive(Copy, Clone, Debug, Default)]
pub struct Headless;

impl Frontend for Headless {
    fn draw(&mut self, _coords: Coord2, _cell: Cell) {}
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Nothing selected
    #[default]
    Idle,
    /// A region is marked and waits for a confirming click
    Selected,
    /// An action is being evaluated or the board is settling, input is ignored
    Locked,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    running: bool,
    input_locked: bool,
    score: u32,
    level: u32,
    selection: Region,
    seed: Seed,
}

impl Session {
    fn new(seed: Seed) -> Self {
        Self {
            running: false,
            input_locked: false,
            score: 0,
            level: 0,
            selection: Region::new(),
            seed,
        }
    }

    fn started(seed: Seed) -> Self {
        Self {
            running: true,
            level: 1,
            ..Self::new(seed)
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn selection(&self) -> &Region {
        &self.selection
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }
}

/// Whether the board has been cleared, judged by its bottom-left cell which is the last to drain.
pub fn is_won(grid: &Grid) -> bool {
    grid[(0, grid.dims().bottom())].is_empty()
}

/// Whether a region of two or more cells is left to clear.
pub fn can_move(grid: &Grid) -> bool {
    !is_won(grid) && has_adjacent_pair(grid)
}

/// Owns the board and session, and turns clicks into selections, clears, and settling.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    session: Session,
    settler: Option<Settler>,
}

impl Game {
    /// A game with an empty board that is not running until [`Game::new_game`].
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            grid: Grid::new(config.side),
            session: Session::new(Seed::default()),
            settler: None,
        }
    }

    /// A running game on a prepared board.
    pub fn from_grid(grid: Grid, seed: Seed) -> Self {
        let colors = grid
            .iter()
            .filter_map(|(_, cell)| cell.color_of())
            .max()
            .map_or(1, |color| color + 1);
        Self {
            config: GameConfig::new_unchecked(grid.side(), colors),
            grid,
            session: Session::started(seed),
            settler: None,
        }
    }

    /// Deals a fresh board from `seed`, resetting score and selection.
    pub fn new_game(&mut self, seed: Seed, frontend: &mut impl Frontend) -> Result<()> {
        if self.is_settling() {
            return Err(GameError::Busy);
        }

        self.grid = RandomBoardGenerator::new(seed).generate(self.config);
        self.session = Session::started(seed);
        log::info!("New game, seed {seed}");
        self.redraw(frontend);
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> RoundState {
        if self.session.input_locked {
            RoundState::Locked
        } else if self.session.selection.is_empty() {
            RoundState::Idle
        } else {
            RoundState::Selected
        }
    }

    pub fn is_settling(&self) -> bool {
        self.settler.is_some()
    }

    pub fn has_won(&self) -> bool {
        is_won(&self.grid)
    }

    pub fn can_move(&self) -> bool {
        can_move(&self.grid)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_game(self)
    }

    /// Draws every cell.
    pub fn redraw(&self, frontend: &mut impl Frontend) {
        for (coords, cell) in self.grid.iter() {
            frontend.draw(coords, cell);
        }
    }

    /// Handles a click on the cell at `coords`.
    ///
    /// A [`ClickOutcome::Cleared`] leaves the game locked; drive [`Game::step`] or [`Game::settle`]
    /// until the board has settled to accept input again.
    pub fn click(&mut self, coords: Coord2, frontend: &mut impl Frontend) -> Result<ClickOutcome> {
        if self.session.input_locked {
            log::debug!("{coords:?} ignored, input locked");
            return Ok(ClickOutcome::Ignored);
        }
        let index = self
            .grid
            .dims()
            .to_index(coords)
            .ok_or(GameError::InvalidCoords)?;
        self.check_running()?;

        let selection = &self.session.selection;
        if !selection.is_empty() && !selection.contains(&index) {
            log::debug!("{coords:?} outside selection, deselect");
            self.drop_selection(frontend);
            return Ok(ClickOutcome::Deselected);
        }

        self.session.input_locked = true;
        let outcome = if self.grid[index].is_selected() {
            self.clear_selection(frontend)
        } else {
            self.select_region(coords, frontend)
        };
        log::debug!("{coords:?} {outcome:?}");

        if !self.is_settling() {
            self.finish_action(frontend);
        }
        Ok(outcome)
    }

    /// Applies one settling swap, `None` once the board is at rest and input is unlocked again.
    pub fn step(&mut self, frontend: &mut impl Frontend) -> Option<Swap> {
        let settler = self.settler.as_mut()?;
        match settler.step(&mut self.grid) {
            Some(swap) => {
                self.draw_index(swap.from, frontend);
                self.draw_index(swap.to, frontend);
                frontend.pace();
                Some(swap)
            }
            None => {
                self.settler = None;
                debug_assert!(is_settled(&self.grid));
                self.finish_action(frontend);
                None
            }
        }
    }

    /// Runs settling to completion, returning the number of swaps.
    pub fn settle(&mut self, frontend: &mut impl Frontend) -> usize {
        let mut swaps = 0;
        while self.step(frontend).is_some() {
            swaps += 1;
        }
        swaps
    }

    fn select_region(&mut self, coords: Coord2, frontend: &mut impl Frontend) -> ClickOutcome {
        let region = find_region(&self.grid, coords);
        if region.len() <= 1 {
            return ClickOutcome::NoMatch;
        }

        for &index in &region {
            let cell = self.grid[index].with_selection(true);
            self.grid.set_index(index, cell);
            self.draw_index(index, frontend);
        }
        let size = region.len();
        self.session.selection = region;
        ClickOutcome::Selected {
            size,
            potential: score_for(size),
        }
    }

    fn clear_selection(&mut self, frontend: &mut impl Frontend) -> ClickOutcome {
        let selection = core::mem::take(&mut self.session.selection);
        let size = selection.len();
        let points = score_for(size);
        self.session.score = self.session.score.saturating_add(points);

        for &index in &selection {
            self.grid.set_index(index, Cell::EMPTY);
            self.draw_index(index, frontend);
        }
        self.settler = Some(Settler::new(self.grid.dims()));
        ClickOutcome::Cleared { size, points }
    }

    fn drop_selection(&mut self, frontend: &mut impl Frontend) {
        let selection = core::mem::take(&mut self.session.selection);
        for &index in &selection {
            let cell = self.grid[index].with_selection(false);
            self.grid.set_index(index, cell);
            self.draw_index(index, frontend);
        }
    }

    fn finish_action(&mut self, frontend: &mut impl Frontend) {
        self.session.input_locked = false;

        let snapshot = self.snapshot();
        if snapshot.has_won {
            self.session.running = false;
            log::info!("Board cleared, final score {}", self.session.score);
        } else if !snapshot.can_move {
            self.session.running = false;
            log::info!("No moves left, final score {}", self.session.score);
        }
        frontend.report(&snapshot);
    }

    fn draw_index(&self, index: CellIndex, frontend: &mut impl Frontend) {
        let coords = self.grid.dims().to_coords(index);
        frontend.draw(coords, self.grid[index]);
    }

    fn check_running(&self) -> Result<()> {
        if self.session.running {
            Ok(())
        } else {
            Err(GameError::NotRunning)
        }
    }
}
