//! Common types: coordinates, cell states, shot outcomes and errors.

use core::fmt;
use core::str::FromStr;

use crate::bitboard::BitBoardError;
use crate::config::GRID_SIZE;

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];
const SURROUNDING: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// A (row, col) position on the 10×10 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Checked constructor.
    pub fn try_new(row: usize, col: usize) -> Option<Self> {
        let coord = Self::new(row, col);
        coord.in_bounds().then_some(coord)
    }

    pub fn in_bounds(self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// The cell `(dr, dc)` away, if it is on the grid.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Self::try_new(row, col)
    }

    /// North, South, East and West neighbours, clipped to the grid.
    pub fn neighbors4(self) -> impl Iterator<Item = Coord> {
        ORTHOGONAL
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(dr, dc))
    }

    /// All eight surrounding cells, clipped to the grid.
    pub fn neighbors8(self) -> impl Iterator<Item = Coord> {
        SURROUNDING
            .iter()
            .filter_map(move |&(dr, dc)| self.offset(dr, dc))
    }

    /// Every grid coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Coord::new(row, col)))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord::new(row, col)
    }
}

/// Board notation: column letter then 1-based row, e.g. `C7`.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'A' + self.col as u8) as char;
        write!(f, "{}{}", col, self.row + 1)
    }
}

/// Reasons a coordinate string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCoordError {
    Empty,
    BadColumn(char),
    BadRow,
    OutOfBounds,
}

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::Empty => write!(f, "empty coordinate"),
            ParseCoordError::BadColumn(c) => write!(f, "invalid column '{}', expected A-J", c),
            ParseCoordError::BadRow => write!(f, "invalid row, expected a number 1-10"),
            ParseCoordError::OutOfBounds => write!(f, "coordinate is off the grid"),
        }
    }
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let col_ch = chars.next().ok_or(ParseCoordError::Empty)?.to_ascii_uppercase();
        if !col_ch.is_ascii_uppercase() {
            return Err(ParseCoordError::BadColumn(col_ch));
        }
        let col = (col_ch as u8 - b'A') as usize;
        let row: usize = chars
            .as_str()
            .parse()
            .map_err(|_| ParseCoordError::BadRow)?;
        if row == 0 {
            return Err(ParseCoordError::BadRow);
        }
        Coord::try_new(row - 1, col).ok_or(ParseCoordError::OutOfBounds)
    }
}

/// What the attacking side knows about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Unknown,
    Hit,
    Miss,
}

/// Result of firing at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    Hit,
    Miss,
}

impl ShotOutcome {
    pub fn is_hit(self) -> bool {
        self == ShotOutcome::Hit
    }
}

/// Participant in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Human,
    Computer,
}

/// A shot that has been fired, published for presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotEvent {
    pub shooter: Side,
    pub coord: Coord,
    pub outcome: ShotOutcome,
}

/// Errors returned by grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    OutOfBounds(Coord),
    /// The cell already holds a hit or miss marker.
    AlreadyFired(Coord),
    /// A text picture did not have 10 rows of 10 cells.
    Malformed { line: usize },
    UnknownMarker(char),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds(c) => write!(f, "({}, {}) is outside the grid", c.row, c.col),
            GridError::AlreadyFired(c) => write!(f, "{} has already been fired upon", c),
            GridError::Malformed { line } => write!(f, "grid line {} is malformed", line),
            GridError::UnknownMarker(ch) => write!(f, "unknown cell marker '{}'", ch),
        }
    }
}

/// Errors returned while deploying a fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    BitBoardError(BitBoardError),
    ShipOutOfBounds,
    ShipOverlaps,
    /// Random deployment gave up after exhausting its restarts.
    UnableToPlace { ship: &'static str },
    /// A fixed layout was applied to a fleet of the wrong size.
    FleetSizeMismatch { expected: usize, found: usize },
}

impl From<BitBoardError> for PlacementError {
    fn from(err: BitBoardError) -> Self {
        PlacementError::BitBoardError(err)
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            PlacementError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            PlacementError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            PlacementError::UnableToPlace { ship } => {
                write!(f, "Unable to place {} after repeated restarts", ship)
            }
            PlacementError::FleetSizeMismatch { expected, found } => write!(
                f,
                "Fixed layout needs {} ships but the fleet has {}",
                expected, found
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GridError {}
#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for ParseCoordError {}
