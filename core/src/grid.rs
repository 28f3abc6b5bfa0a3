use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;

use crate::*;

/// Square board of cells, stored row-major so the memory order matches [`Dims::to_index`].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    dims: Dims,
    cells: Array2<Cell>,
}

impl Grid {
    /// An all-empty board.
    pub fn new(side: Coord) -> Self {
        let dims = Dims::new(side);
        let side = usize::from(dims.side());
        Self {
            dims,
            cells: Array2::from_elem((side, side), Cell::EMPTY),
        }
    }

    /// Builds a board from cells listed in index order.
    pub fn from_cells(side: Coord, cells: Vec<Cell>) -> Result<Self> {
        if side == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let dims = Dims::new(side);
        let side = usize::from(side);
        let cells = Array2::from_shape_vec((side, side), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { dims, cells })
    }

    /// Like [`Grid::from_cells`] with `None` standing for an empty cell.
    ///
    /// # Panics
    ///
    /// When a color is outside the palette.
    pub fn from_colors(side: Coord, colors: &[Option<ColorIndex>]) -> Result<Self> {
        let cells = colors
            .iter()
            .map(|color| color.map_or(Cell::EMPTY, Cell::color))
            .collect();
        Self::from_cells(side, cells)
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    pub fn side(&self) -> Coord {
        self.dims.side()
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.dims
            .contains(coords)
            .then(|| self.cells[self.dims.to_nd_index(coords)])
    }

    pub fn set(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        if !self.dims.contains(coords) {
            return Err(GameError::InvalidCoords);
        }
        self.cells[self.dims.to_nd_index(coords)] = cell;
        Ok(())
    }

    pub(crate) fn set_index(&mut self, index: CellIndex, cell: Cell) {
        let coords = self.dims.to_coords(index);
        self.cells[self.dims.to_nd_index(coords)] = cell;
    }

    /// Exchanges two cells by linear index.
    ///
    /// # Panics
    ///
    /// When either index is off the board.
    pub fn swap(&mut self, a: CellIndex, b: CellIndex) {
        let a = self.dims.to_nd_index(self.dims.to_coords(a));
        let b = self.dims.to_nd_index(self.dims.to_coords(b));
        self.cells.swap(a, b);
    }

    /// Gives every cell an independent, uniformly drawn color from `0..colors`.
    pub fn fill_random<R: Rng>(&mut self, colors: u8, rng: &mut R) {
        debug_assert!((1..=MAX_COLORS).contains(&colors));
        for cell in self.cells.iter_mut() {
            *cell = Cell::color(rng.random_range(0..colors));
        }
    }

    /// All cells with their coordinates, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.dims.iter_coords().map(move |coords| (coords, self[coords]))
    }

    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[self.dims.to_nd_index(coords)]
    }
}

impl Index<CellIndex> for Grid {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self[self.dims.to_coords(index)]
    }
}

/// One line per row, `.` for empty cells and the color digit otherwise.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                match cell.color_of() {
                    Some(color) => write!(f, "{color}")?,
                    None => f.write_str(".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
