//! Ship definitions and placed ships.

use crate::bitboard::CellSet;
use crate::common::{Coord, PlacementError};
use crate::config::GRID_SIZE;

/// Orientation of a ship, and the axis of a partially hit one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Whether `a` and `b` lie on a common line along this axis.
    pub fn aligned(self, a: Coord, b: Coord) -> bool {
        match self {
            Orientation::Horizontal => a.row == b.row,
            Orientation::Vertical => a.col == b.col,
        }
    }
}

/// Name and length of a fleet entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipDef {
    name: &'static str,
    length: usize,
}

impl ShipDef {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    def: ShipDef,
    orientation: Orientation,
    origin: Coord,
    mask: CellSet,
}

impl Ship {
    /// Place `def` with its top-left cell at `origin`.
    pub fn new(def: ShipDef, orientation: Orientation, origin: Coord) -> Result<Self, PlacementError> {
        let len = def.length();
        if len == 0 {
            return Err(PlacementError::ShipOutOfBounds);
        }
        let (end_row, end_col) = match orientation {
            Orientation::Horizontal => (origin.row, origin.col + len - 1),
            Orientation::Vertical => (origin.row + len - 1, origin.col),
        };
        if end_row >= GRID_SIZE || end_col >= GRID_SIZE {
            return Err(PlacementError::ShipOutOfBounds);
        }

        let cells = (0..len).map(|i| match orientation {
            Orientation::Horizontal => Coord::new(origin.row, origin.col + i),
            Orientation::Vertical => Coord::new(origin.row + i, origin.col),
        });
        let mask = CellSet::from_coords(cells)?;
        Ok(Ship {
            def,
            orientation,
            origin,
            mask,
        })
    }

    pub fn def(&self) -> ShipDef {
        self.def
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cells covered by the ship.
    pub fn mask(&self) -> CellSet {
        self.mask
    }

    pub fn overlaps(&self, other: &Ship) -> bool {
        !(self.mask & other.mask).is_empty()
    }
}
