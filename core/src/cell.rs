use bitflags::bitflags;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of distinct colors a cell can encode.
pub const MAX_COLORS: u8 = 8;

bitflags! {
    /// Bit layout of a [`Cell`]: one-hot color in the low byte, then the empty and selected marks.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct CellFlags: u16 {
        const COLORS   = 0x00ff;
        const EMPTY    = 1 << 8;
        const SELECTED = 1 << 9;
    }
}

/// A single board cell packed into one `u16`.
///
/// Exactly one of the color bits or [`CellFlags::EMPTY`] is set. The selected mark is a separate
/// facet that can be combined with either and never takes part in color comparisons.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Cell(CellFlags);

impl Cell {
    pub const EMPTY: Self = Self(CellFlags::EMPTY);

    /// # Panics
    ///
    /// When `color` is not below [`MAX_COLORS`].
    pub fn color(color: ColorIndex) -> Self {
        assert!(color < MAX_COLORS, "color index {color} is outside the palette");
        Self(CellFlags::from_bits_retain(1 << color))
    }

    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Decodes a raw value, rejecting anything that is not exactly one color or empty.
    pub fn from_bits(bits: u16) -> Result<Self> {
        let flags = CellFlags::from_bits(bits).ok_or(GameError::InvalidCell(bits))?;
        let colors = flags.intersection(CellFlags::COLORS).bits();
        let valid = if flags.contains(CellFlags::EMPTY) {
            colors == 0
        } else {
            colors.count_ones() == 1
        };

        if valid {
            Ok(Self(flags))
        } else {
            Err(GameError::InvalidCell(bits))
        }
    }

    pub const fn bits(self) -> u16 {
        self.0.bits()
    }

    pub fn is_empty(self) -> bool {
        self.0.contains(CellFlags::EMPTY)
    }

    pub fn color_of(self) -> Option<ColorIndex> {
        self.check();
        if self.is_empty() {
            return None;
        }
        let colors = self.0.intersection(CellFlags::COLORS).bits();
        Some(colors.trailing_zeros() as ColorIndex)
    }

    pub fn is_selected(self) -> bool {
        self.0.contains(CellFlags::SELECTED)
    }

    pub fn with_selection(self, selected: bool) -> Self {
        let mut flags = self.0;
        flags.set(CellFlags::SELECTED, selected);
        Self(flags)
    }

    /// Color-only equality; empty cells never match anything.
    pub fn same_color(self, other: Self) -> bool {
        match (self.color_of(), other.color_of()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn check(self) {
        debug_assert!(
            Self::from_bits(self.bits()).is_ok(),
            "malformed cell {:#06x}",
            self.bits()
        );
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl TryFrom<u16> for Cell {
    type Error = GameError;

    fn try_from(bits: u16) -> Result<Self> {
        Self::from_bits(bits)
    }
}

impl From<Cell> for u16 {
    fn from(cell: Cell) -> Self {
        cell.bits()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color_of() {
            Some(color) => write!(f, "Color({color})")?,
            None => f.write_str("Empty")?,
        }
        if self.is_selected() {
            f.write_str("*")?;
        }
        Ok(())
    }
}
