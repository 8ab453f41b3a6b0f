//! The 10×10 playing grid.
//!
//! A [`Grid`] stores ground truth: which cells hold a ship and which cells
//! have been fired upon. Attackers should reason over [`Grid::state`], which
//! hides the difference between an unfired ship cell and unfired water.

use core::fmt;
use core::str::FromStr;

use crate::common::{CellState, Coord, GridError, PlacementError, ShotOutcome};
use crate::config::GRID_SIZE;
use crate::ship::Ship;

/// Ground-truth contents of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    Hit,
    Miss,
}

impl Cell {
    /// The attacker's view of this cell.
    pub fn state(self) -> CellState {
        match self {
            Cell::Empty | Cell::Ship => CellState::Unknown,
            Cell::Hit => CellState::Hit,
            Cell::Miss => CellState::Miss,
        }
    }

    fn marker(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Ship => 'O',
            Cell::Hit => 'T',
            Cell::Miss => 'X',
        }
    }

    fn from_marker(ch: char) -> Result<Self, GridError> {
        match ch {
            '.' | ' ' => Ok(Cell::Empty),
            'O' => Ok(Cell::Ship),
            'T' => Ok(Cell::Hit),
            'X' => Ok(Cell::Miss),
            other => Err(GridError::UnknownMarker(other)),
        }
    }
}

/// Fixed-size grid of cells, indexed by [`Coord`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    /// All water, nothing fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid with the given ships' cells marked.
    pub fn with_ships(ships: &[Ship]) -> Result<Self, PlacementError> {
        let mut grid = Self::new();
        for ship in ships {
            grid.add_ship(ship)?;
        }
        Ok(grid)
    }

    /// Mark a ship's cells, refusing overlaps with ships already present.
    pub fn add_ship(&mut self, ship: &Ship) -> Result<(), PlacementError> {
        if ship.mask().iter().any(|c| self.cells[c.row][c.col] != Cell::Empty) {
            return Err(PlacementError::ShipOverlaps);
        }
        for c in ship.mask().iter() {
            self.cells[c.row][c.col] = Cell::Ship;
        }
        Ok(())
    }

    pub fn get(&self, coord: Coord) -> Result<Cell, GridError> {
        if !coord.in_bounds() {
            return Err(GridError::OutOfBounds(coord));
        }
        Ok(self.cells[coord.row][coord.col])
    }

    /// The attacker's view of `coord`; off-grid cells read as `Miss`.
    pub fn state(&self, coord: Coord) -> CellState {
        self.get(coord).map(Cell::state).unwrap_or(CellState::Miss)
    }

    /// Not yet fired upon.
    pub fn is_unknown(&self, coord: Coord) -> bool {
        self.state(coord) == CellState::Unknown
    }

    /// Overwrite a cell. Used to build fixtures and scratch positions.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> Result<(), GridError> {
        if !coord.in_bounds() {
            return Err(GridError::OutOfBounds(coord));
        }
        self.cells[coord.row][coord.col] = cell;
        Ok(())
    }

    /// Fire at `coord`, resolving it to `Hit` or `Miss`.
    pub fn fire(&mut self, coord: Coord) -> Result<ShotOutcome, GridError> {
        let cell = self.get(coord)?;
        let (next, outcome) = match cell {
            Cell::Ship => (Cell::Hit, ShotOutcome::Hit),
            Cell::Empty => (Cell::Miss, ShotOutcome::Miss),
            Cell::Hit | Cell::Miss => return Err(GridError::AlreadyFired(coord)),
        };
        self.cells[coord.row][coord.col] = next;
        Ok(outcome)
    }

    /// True iff no unfired ship cell remains.
    pub fn is_game_over(&self) -> bool {
        self.remaining_ship_cells() == 0
    }

    pub fn remaining_ship_cells(&self) -> usize {
        self.count(Cell::Ship)
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == kind)
            .count()
    }

    /// Cells not yet fired upon, row-major.
    pub fn unknown_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |&c| self.is_unknown(c))
    }
}

/// Ten lines of ten markers: `.` water, `O` ship, `T` hit, `X` miss.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            for cell in row.iter() {
                write!(f, "{}", cell.marker())?;
            }
            if r + 1 < GRID_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{")?;
        writeln!(f, "{}", self)?;
        write!(f, "}}")
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Grid::new();
        let mut rows = 0;
        for (r, line) in s.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            if r >= GRID_SIZE || line.chars().count() != GRID_SIZE {
                return Err(GridError::Malformed { line: r });
            }
            for (c, ch) in line.chars().enumerate() {
                grid.cells[r][c] = Cell::from_marker(ch)?;
            }
            rows += 1;
        }
        if rows != GRID_SIZE {
            return Err(GridError::Malformed { line: rows });
        }
        Ok(grid)
    }
}
