use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlePhase {
    /// Tokens drop down their own column.
    Fall,
    /// Drained columns are refilled from the right.
    Compact,
}

/// One elementary move: the token at `from` traded places with the empty cell at `to`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub from: CellIndex,
    pub to: CellIndex,
    pub phase: SettlePhase,
}

/// Position of the settling walk between two swaps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Cursor {
    Fall {
        x: Coord,
        y: Coord,
        scan: Option<FallScan>,
    },
    Compact {
        x: Coord,
        scan: Option<CompactScan>,
    },
    Done,
}

/// Upward walk from an empty slot; `hole` is the row currently holding the gap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct FallScan {
    hole: Coord,
    swapped: bool,
}

/// Bottom-up walk pulling the right-hand column into an empty one; `row` is `None` past the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CompactScan {
    row: Option<Coord>,
    swapped: bool,
}

impl Cursor {
    fn start(dims: Dims) -> Self {
        Self::Fall {
            x: 0,
            y: dims.bottom(),
            scan: None,
        }
    }

    fn next_row(dims: Dims, x: Coord, y: Coord) -> Self {
        match y.checked_sub(1) {
            Some(y) => Self::Fall { x, y, scan: None },
            None => Self::Fall {
                x: x + 1,
                y: dims.bottom(),
                scan: None,
            },
        }
    }

    /// Moves the walk forward by one inspection, performing at most one swap.
    fn advance(self, grid: &mut Grid) -> (Self, Option<Swap>) {
        use Cursor::*;

        let dims = grid.dims();
        match self {
            Fall { x, .. } if x >= dims.side() => (Compact { x: 0, scan: None }, None),
            Fall { x, y, scan: None } => {
                if grid[(x, y)].is_empty() {
                    let scan = FallScan {
                        hole: y,
                        swapped: false,
                    };
                    (Fall { x, y, scan: Some(scan) }, None)
                } else {
                    (Self::next_row(dims, x, y), None)
                }
            }
            Fall {
                x,
                y,
                scan: Some(scan),
            } => {
                let Some(above) = scan.hole.checked_sub(1) else {
                    // column top reached, look at the same slot again if anything moved into it
                    let next = if scan.swapped {
                        Fall { x, y, scan: None }
                    } else {
                        Self::next_row(dims, x, y)
                    };
                    return (next, None);
                };

                let hole = (x, scan.hole);
                let source = (x, above);
                let mut scan = FallScan {
                    hole: above,
                    ..scan
                };
                let swap = if grid[source].is_empty() {
                    None
                } else {
                    scan.swapped = true;
                    Some(swap_cells(grid, source, hole, SettlePhase::Fall))
                };
                (Fall { x, y, scan: Some(scan) }, swap)
            }
            Compact { x, .. } if x >= dims.side() => (Done, None),
            Compact { x, scan: None } => {
                if grid[(x, dims.bottom())].is_empty() {
                    let scan = CompactScan {
                        row: Some(dims.bottom()),
                        swapped: false,
                    };
                    (Compact { x, scan: Some(scan) }, None)
                } else {
                    (Compact { x: x + 1, scan: None }, None)
                }
            }
            Compact {
                x,
                scan: Some(scan),
            } => {
                let row = match scan.row {
                    Some(row) if x < dims.right() => row,
                    _ => {
                        // step back one column so a cascade of empty columns is caught
                        let x = if scan.swapped {
                            x.saturating_sub(1)
                        } else {
                            x + 1
                        };
                        return (Compact { x, scan: None }, None);
                    }
                };

                let source = (x + 1, row);
                let mut scan = CompactScan {
                    row: row.checked_sub(1),
                    ..scan
                };
                let swap = if grid[source].is_empty() {
                    None
                } else {
                    scan.swapped = true;
                    Some(swap_cells(grid, source, (x, row), SettlePhase::Compact))
                };
                (Compact { x, scan: Some(scan) }, swap)
            }
            Done => (Done, None),
        }
    }
}

fn swap_cells(grid: &mut Grid, from: Coord2, to: Coord2, phase: SettlePhase) -> Swap {
    let dims = grid.dims();
    let swap = Swap {
        from: dims.index_of(from),
        to: dims.index_of(to),
        phase,
    };
    debug_assert!(grid[swap.to].is_empty(), "settling into a filled cell");
    grid.swap(swap.from, swap.to);
    swap
}

/// Resumable settling of a board after cells were cleared.
///
/// Each call to [`Settler::step`] applies exactly one swap, so a frontend can pause between moves.
/// The settler does not hold on to the grid; the same grid has to be passed to every call and must
/// not be modified in between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settler {
    dims: Dims,
    cursor: Cursor,
}

impl Settler {
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            cursor: Cursor::start(dims),
        }
    }

    pub fn is_done(&self) -> bool {
        self.cursor == Cursor::Done
    }

    /// Applies the next swap to `grid` and returns it, or `None` when nothing is left to move.
    pub fn step(&mut self, grid: &mut Grid) -> Option<Swap> {
        debug_assert_eq!(grid.dims(), self.dims, "settler used with another board");

        loop {
            let (cursor, swap) = self.cursor.advance(grid);
            self.cursor = cursor;
            if let Some(swap) = swap {
                log::trace!("settle {swap:?}");
                return Some(swap);
            }
            if cursor == Cursor::Done {
                return None;
            }
        }
    }
}

/// Runs a full settle on `grid`, returning the number of swaps made.
pub fn settle(grid: &mut Grid) -> usize {
    let mut settler = Settler::new(grid.dims());
    let mut swaps = 0;
    while settler.step(grid).is_some() {
        swaps += 1;
    }
    swaps
}

/// Whether column `x` has an empty cell below a filled one.
pub fn has_gap(grid: &Grid, x: Coord) -> bool {
    let mut seen_filled = false;
    for y in 0..grid.side() {
        let empty = grid[(x, y)].is_empty();
        if seen_filled && empty {
            return true;
        }
        seen_filled |= !empty;
    }
    false
}

/// No gaps in any column and no drained column left of a filled one.
pub fn is_settled(grid: &Grid) -> bool {
    let dims = grid.dims();
    let mut seen_drained = false;
    for x in 0..dims.side() {
        if has_gap(grid, x) {
            return false;
        }
        let drained = grid[(x, dims.bottom())].is_empty();
        if seen_drained && !drained {
            return false;
        }
        seen_drained |= drained;
    }
    true
}
