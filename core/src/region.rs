use alloc::collections::BTreeSet;
use alloc::vec;

use crate::*;

/// Linear indices of a connected same-colored area.
pub type Region = BTreeSet<CellIndex>;

/// Collects the 4-connected region sharing the color of the cell at `seed`.
///
/// The result always contains `seed` itself unless that cell is empty or off the board, in which case
/// it is empty. Selection marks are ignored when comparing colors.
pub fn find_region(grid: &Grid, seed: Coord2) -> Region {
    let dims = grid.dims();
    let mut region = Region::new();

    let Some(seed_index) = dims.to_index(seed) else {
        return region;
    };
    let target = grid[seed_index];
    if target.is_empty() {
        return region;
    }

    region.insert(seed_index);
    let mut to_visit = vec![seed];
    while let Some(coords) = to_visit.pop() {
        for neighbor in dims.iter_adjacent(coords) {
            let Some(index) = dims.to_index(neighbor) else {
                continue;
            };
            if grid[index].same_color(target) && region.insert(index) {
                to_visit.push(neighbor);
            }
        }
    }

    region
}

/// Whether any filled cell touches a cell of the same color.
pub fn has_adjacent_pair(grid: &Grid) -> bool {
    let dims = grid.dims();
    grid.iter()
        .filter(|(_, cell)| !cell.is_empty())
        .any(|(coords, cell)| {
            dims.iter_adjacent(coords)
                .any(|neighbor| grid[neighbor].same_color(cell))
        })
}
