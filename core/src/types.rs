use serde::{Deserialize, Serialize};

/// Single coordinate axis, also used for the board side length.
pub type Coord = u8;

/// Two-dimensional coordinates `(x, y)`, `y = 0` being the top row.
pub type Coord2 = (Coord, Coord);

/// Linear position of a cell, `y * side + x`.
pub type CellIndex = usize;

/// Index into the color palette, `0..MAX_COLORS`.
pub type ColorIndex = u8;

/// Dimensions of a square board, mapping between coordinates and linear indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawDims")]
pub struct Dims {
    side: Coord,
}

/// Unchecked serialized form, clamped through [`Dims::new`].
#[derive(Deserialize)]
struct RawDims {
    side: Coord,
}

impl From<RawDims> for Dims {
    fn from(raw: RawDims) -> Self {
        Self::new(raw.side)
    }
}

impl Dims {
    pub const fn new(side: Coord) -> Self {
        let side = if side == 0 { 1 } else { side };
        Self { side }
    }

    pub const fn side(self) -> Coord {
        self.side
    }

    /// Row index of the bottom edge, where tokens come to rest.
    pub const fn bottom(self) -> Coord {
        self.side - 1
    }

    /// Column index of the right edge.
    pub const fn right(self) -> Coord {
        self.side - 1
    }

    pub const fn len(self) -> usize {
        let side = self.side as usize;
        side * side
    }

    pub const fn contains(self, (x, y): Coord2) -> bool {
        x < self.side && y < self.side
    }

    /// Maps `(x, y)` to its linear index, `None` when either axis is off the board.
    pub const fn to_index(self, coords: Coord2) -> Option<CellIndex> {
        if !self.contains(coords) {
            return None;
        }
        let (x, y) = coords;
        Some(y as usize * self.side as usize + x as usize)
    }

    /// [`Dims::to_index`] for coordinates already known to be on the board.
    pub(crate) const fn index_of(self, (x, y): Coord2) -> CellIndex {
        debug_assert!(x < self.side && y < self.side);
        y as usize * self.side as usize + x as usize
    }

    /// Inverse of [`Dims::to_index`].
    ///
    /// # Panics
    ///
    /// When `index` is not below [`Dims::len`].
    pub fn to_coords(self, index: CellIndex) -> Coord2 {
        assert!(
            index < self.len(),
            "cell index {index} out of range for a {0}x{0} board",
            self.side
        );
        let side = self.side as usize;
        ((index % side) as Coord, (index / side) as Coord)
    }

    pub(crate) const fn to_nd_index(self, (x, y): Coord2) -> [usize; 2] {
        [y as usize, x as usize]
    }

    /// All coordinates in linear index order.
    pub fn iter_coords(self) -> impl Iterator<Item = Coord2> {
        let side = self.side;
        (0..side).flat_map(move |y| (0..side).map(move |x| (x, y)))
    }

    /// The 4-neighborhood of `center` that lies on the board.
    pub fn iter_adjacent(self, center: Coord2) -> AdjacentIter {
        AdjacentIter::new(center, self.side)
    }
}

const DISPLACEMENTS: [(i8, i8); 4] = [
    // left
    (-1, 0),
    // right
    (1, 0),
    // up
    (0, -1),
    // down
    (0, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), side: Coord) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= side {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= side {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct AdjacentIter {
    center: Coord2,
    side: Coord,
    index: u8,
}

impl AdjacentIter {
    fn new(center: Coord2, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for AdjacentIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.side) {
                return Some(next_item);
            }
        }
    }
}
