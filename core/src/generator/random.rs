use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Fills every cell independently and uniformly from the configured palette. Equal seeds give equal
/// boards.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: Seed,
}

impl RandomBoardGenerator {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Grid {
        let mut grid = Grid::new(config.side);
        let mut rng = SmallRng::seed_from_u64(self.seed.value());
        grid.fill_random(config.colors.clamp(1, MAX_COLORS), &mut rng);
        log::debug!(
            "Generated {0}x{0} board with {1} colors from seed {2}",
            grid.side(),
            config.colors,
            self.seed
        );
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::default();

        let a = RandomBoardGenerator::new(Seed::new(99)).generate(config);
        let b = RandomBoardGenerator::new(Seed::new(99)).generate(config);
        let c = RandomBoardGenerator::new(Seed::new(100)).generate(config);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn board_is_full_and_sized_by_config() {
        let config = GameConfig::new(6, 3);

        let grid = RandomBoardGenerator::new(Seed::default()).generate(config);

        assert_eq!(grid.side(), 6);
        assert!(grid
            .iter()
            .all(|(_, cell)| matches!(cell.color_of(), Some(color) if color < 3)));
        assert!(!grid.iter().any(|(_, cell)| cell.is_selected()));
    }
}
