#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use gravity::*;
pub use grid::*;
pub use region::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod gravity;
mod grid;
mod region;
mod snapshot;
mod types;

pub const DEFAULT_SIDE: Coord = 10;
pub const DEFAULT_COLORS: u8 = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub side: Coord,
    pub colors: u8,
}

impl GameConfig {
    pub const fn new_unchecked(side: Coord, colors: u8) -> Self {
        Self { side, colors }
    }

    pub fn new(side: Coord, colors: u8) -> Self {
        let clamped_side = side.max(1);
        let clamped_colors = colors.clamp(1, MAX_COLORS);
        if (clamped_side, clamped_colors) != (side, colors) {
            log::warn!(
                "Board config clamped, requested {side}x{side} with {colors} colors, using {clamped_side}x{clamped_side} with {clamped_colors}"
            );
        }
        Self::new_unchecked(clamped_side, clamped_colors)
    }

    pub const fn dims(&self) -> Dims {
        Dims::new(self.side)
    }

    pub const fn total_cells(&self) -> usize {
        self.dims().len()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_SIDE, DEFAULT_COLORS)
    }
}

/// Seed for board generation, written as hex (`00000001`) in text and in serialized form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Seed(u64);

impl Seed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self(1)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl FromStr for Seed {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.len() > 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(GameError::InvalidSeed);
        }
        u64::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| GameError::InvalidSeed)
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        seed.to_string()
    }
}

impl TryFrom<String> for Seed {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Points for clearing a region of `size` cells: `size * (5 + size)`.
pub const fn score_for(size: usize) -> u32 {
    let size = size as u32;
    size.saturating_mul(size.saturating_add(5))
}

/// Outcome of a click on the board
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Input is locked while the board settles
    Ignored,
    /// Click outside the current selection dropped it
    Deselected,
    /// Clicked cell has no same-colored neighbor
    NoMatch,
    Selected { size: usize, potential: u32 },
    /// Selection removed, the board still has to settle
    Cleared { size: usize, points: u32 },
}

impl ClickOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use ClickOutcome::*;
        match self {
            Ignored => false,
            Deselected => true,
            NoMatch => false,
            Selected { .. } => true,
            Cleared { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_grows_quadratically() {
        assert_eq!(score_for(0), 0);
        assert_eq!(score_for(2), 14);
        assert_eq!(score_for(3), 24);
        assert_eq!(score_for(4), 36);
        assert_eq!(score_for(5), 50);
        assert_eq!(score_for(100), 10_500);
    }

    #[test]
    fn seed_round_trips_through_hex() {
        assert_eq!(Seed::default().to_string(), "00000001");
        assert_eq!(Seed::new(0xdead_beef_cafe).to_string(), "deadbeefcafe");
        assert_eq!("00000001".parse(), Ok(Seed::new(1)));
        assert_eq!(" ff ".parse(), Ok(Seed::new(255)));
        assert_eq!("".parse::<Seed>(), Err(GameError::InvalidSeed));
        assert_eq!("xyz".parse::<Seed>(), Err(GameError::InvalidSeed));
        assert_eq!("+1".parse::<Seed>(), Err(GameError::InvalidSeed));
        assert_eq!(
            "12345678123456789".parse::<Seed>(),
            Err(GameError::InvalidSeed)
        );
    }

    #[test]
    fn seed_serializes_as_hex_string() {
        assert_eq!(serde_json::to_string(&Seed::new(0xbeef)).unwrap(), r#""0000beef""#);
        assert_eq!(serde_json::from_str::<Seed>(r#""0000beef""#).unwrap(), Seed::new(0xbeef));

        let max = serde_json::to_string(&Seed::new(u64::MAX)).unwrap();
        assert_eq!(max, r#""ffffffffffffffff""#);
        assert_eq!(serde_json::from_str::<Seed>(&max).unwrap(), Seed::new(u64::MAX));

        assert!(serde_json::from_str::<Seed>("48879").is_err());
        assert!(serde_json::from_str::<Seed>(r#""not hex""#).is_err());
    }

    #[test]
    fn only_board_changing_outcomes_have_updates() {
        assert!(!ClickOutcome::Ignored.has_update());
        assert!(!ClickOutcome::NoMatch.has_update());
        assert!(ClickOutcome::Deselected.has_update());
        assert!(ClickOutcome::Selected { size: 2, potential: 14 }.has_update());
        assert!(ClickOutcome::Cleared { size: 2, points: 14 }.has_update());
    }

    #[test]
    fn config_is_clamped() {
        assert_eq!(GameConfig::new(0, 0), GameConfig::new_unchecked(1, 1));
        assert_eq!(GameConfig::new(12, 20), GameConfig::new_unchecked(12, MAX_COLORS));
        assert_eq!(GameConfig::default().total_cells(), 100);
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"side": 6}"#).unwrap();
        assert_eq!(config, GameConfig::new_unchecked(6, DEFAULT_COLORS));
    }
}
