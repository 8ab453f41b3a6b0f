//! Fleet deployment: random placement with restarts and the fixed layouts.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::{Coord, PlacementError};
use crate::config::{FLEET, GRID_SIZE, PLACEMENT_ATTEMPTS};
use crate::grid::Grid;
use crate::ship::{Orientation, Ship, ShipDef};

/// Origin and orientation for one ship of a fixed layout.
pub type FixedPosition = (Coord, Orientation);

/// Ships spread across the grid with open water between them.
pub const SPARSE_LAYOUT: [FixedPosition; 7] = [
    (Coord::new(3, 1), Orientation::Vertical),
    (Coord::new(1, 2), Orientation::Horizontal),
    (Coord::new(5, 3), Orientation::Vertical),
    (Coord::new(9, 4), Orientation::Horizontal),
    (Coord::new(7, 7), Orientation::Vertical),
    (Coord::new(2, 8), Orientation::Vertical),
    (Coord::new(4, 6), Orientation::Vertical),
];

/// Ships packed against each other in the middle of the grid.
pub const SEAMLESS_LAYOUT: [FixedPosition; 7] = [
    (Coord::new(2, 2), Orientation::Vertical),
    (Coord::new(1, 2), Orientation::Horizontal),
    (Coord::new(5, 3), Orientation::Vertical),
    (Coord::new(7, 4), Orientation::Horizontal),
    (Coord::new(6, 6), Orientation::Vertical),
    (Coord::new(3, 4), Orientation::Horizontal),
    (Coord::new(4, 6), Orientation::Vertical),
];

/// How a side's fleet is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Layout {
    #[default]
    Random,
    Sparse,
    Seamless,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layout::Random => "random",
            Layout::Sparse => "sparse",
            Layout::Seamless => "seamless",
        };
        f.write_str(name)
    }
}

impl Layout {
    /// Deploy the standard fleet.
    pub fn ships<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Vec<Ship>, PlacementError> {
        match self {
            Layout::Random => random_fleet(&FLEET, rng),
            Layout::Sparse => fixed_fleet(&FLEET, &SPARSE_LAYOUT),
            Layout::Seamless => fixed_fleet(&FLEET, &SEAMLESS_LAYOUT),
        }
    }

    /// Deploy the standard fleet onto a fresh grid.
    pub fn deploy<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Grid, PlacementError> {
        let ships = self.ships(rng)?;
        Grid::with_ships(&ships)
    }
}

/// Place every ship at random, restarting the whole fleet when a ship
/// cannot be fitted within its attempt budget.
pub fn random_fleet<R: Rng + ?Sized>(
    fleet: &[ShipDef],
    rng: &mut R,
) -> Result<Vec<Ship>, PlacementError> {
    let mut placed: Vec<Ship> = Vec::with_capacity(fleet.len());
    let mut stuck = None;
    for restart in 0..PLACEMENT_ATTEMPTS {
        placed.clear();
        stuck = None;
        for def in fleet {
            match place_one(*def, &placed, rng)? {
                Some(ship) => placed.push(ship),
                None => {
                    stuck = Some(def.name());
                    break;
                }
            }
        }
        match stuck {
            None => return Ok(placed),
            Some(name) => log::debug!("restart {}: could not fit {}", restart + 1, name),
        }
    }
    Err(PlacementError::UnableToPlace {
        ship: stuck.unwrap_or("fleet"),
    })
}

fn place_one<R: Rng + ?Sized>(
    def: ShipDef,
    placed: &[Ship],
    rng: &mut R,
) -> Result<Option<Ship>, PlacementError> {
    if def.length() == 0 || def.length() > GRID_SIZE {
        return Err(PlacementError::ShipOutOfBounds);
    }
    let span = GRID_SIZE - def.length();
    for _ in 0..PLACEMENT_ATTEMPTS {
        let (origin, orientation) = if rng.random() {
            let row = rng.random_range(0..GRID_SIZE);
            let col = rng.random_range(0..=span);
            (Coord::new(row, col), Orientation::Horizontal)
        } else {
            let row = rng.random_range(0..=span);
            let col = rng.random_range(0..GRID_SIZE);
            (Coord::new(row, col), Orientation::Vertical)
        };
        let ship = Ship::new(def, orientation, origin)?;
        if placed.iter().all(|other| !ship.overlaps(other)) {
            return Ok(Some(ship));
        }
    }
    Ok(None)
}

/// Place ships at predetermined positions, one per fleet entry.
pub fn fixed_fleet(
    fleet: &[ShipDef],
    positions: &[FixedPosition],
) -> Result<Vec<Ship>, PlacementError> {
    if fleet.len() != positions.len() {
        return Err(PlacementError::FleetSizeMismatch {
            expected: positions.len(),
            found: fleet.len(),
        });
    }
    let mut placed: Vec<Ship> = Vec::with_capacity(fleet.len());
    for (def, &(origin, orientation)) in fleet.iter().zip(positions) {
        let ship = Ship::new(*def, orientation, origin)?;
        if placed.iter().any(|other| ship.overlaps(other)) {
            return Err(PlacementError::ShipOverlaps);
        }
        placed.push(ship);
    }
    Ok(placed)
}
