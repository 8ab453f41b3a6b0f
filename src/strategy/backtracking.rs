use alloc::vec::Vec;
use rand::{rngs::SmallRng, Rng};

use super::{is_candidate, mark_visited, Strategy};
use crate::bitboard::CellSet;
use crate::common::{Coord, ShotOutcome};
use crate::config::GRID_SIZE;
use crate::grid::Grid;

/// Random-restart backtracking hunter.
///
/// Blind shots are drawn uniformly at random. Once a ship is hit, its
/// neighbours are pushed onto `moves` and followed depth-first until the
/// stack is empty, at which point the hunter restarts at random.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingHunter {
    visited: CellSet,
    moves: Vec<Coord>,
}

impl BacktrackingHunter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending follow-up moves; the last entry is tried next.
    pub fn moves(&self) -> &[Coord] {
        &self.moves
    }

    fn random_restart(&self, rng: &mut SmallRng, grid: &Grid) -> Option<Coord> {
        if !Coord::all().any(|c| is_candidate(&self.visited, grid, c)) {
            return None;
        }
        loop {
            let coord = Coord::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE));
            if is_candidate(&self.visited, grid, coord) {
                return Some(coord);
            }
        }
    }
}

impl Strategy for BacktrackingHunter {
    fn name(&self) -> &'static str {
        "Backtracking Computer"
    }

    fn select_target(&mut self, rng: &mut SmallRng, grid: &Grid) -> Option<Coord> {
        while let Some(coord) = self.moves.pop() {
            // a cell next to two hits is pushed twice
            if is_candidate(&self.visited, grid, coord) {
                return Some(coord);
            }
        }
        self.random_restart(rng, grid)
    }

    fn record_outcome(&mut self, coord: Coord, outcome: ShotOutcome, grid: &Grid) {
        mark_visited(&mut self.visited, coord);
        if outcome.is_hit() {
            for next in coord.neighbors4() {
                if is_candidate(&self.visited, grid, next) {
                    self.moves.push(next);
                }
            }
        }
    }

    fn visited(&self) -> &CellSet {
        &self.visited
    }
}
