use alloc::vec::Vec;
use rand::rngs::SmallRng;

use super::{is_candidate, mark_visited, Strategy};
use crate::bitboard::CellSet;
use crate::common::{Coord, ShotOutcome};
use crate::grid::Grid;

/// Blind depth-first hunter.
///
/// When its stack runs dry it is refilled with every unfired cell in
/// row-major order, so the blind sweep starts from the bottom-right corner.
/// A hit pushes the orthogonal neighbours on top, which makes the hunter
/// exhaust the area around a ship before resuming the sweep.
#[derive(Debug, Clone, Default)]
pub struct DfsHunter {
    visited: CellSet,
    stack: Vec<Coord>,
}

impl DfsHunter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending coordinates; the last entry is popped next.
    pub fn frontier(&self) -> &[Coord] {
        &self.stack
    }

    fn refill(&mut self, grid: &Grid) {
        let visited = self.visited;
        self.stack
            .extend(Coord::all().filter(|&c| is_candidate(&visited, grid, c)));
    }
}

impl Strategy for DfsHunter {
    fn name(&self) -> &'static str {
        "DFS Computer"
    }

    fn select_target(&mut self, _rng: &mut SmallRng, grid: &Grid) -> Option<Coord> {
        // A stack of stale entries may drain without a candidate; refill once more.
        for _ in 0..2 {
            if self.stack.is_empty() {
                self.refill(grid);
            }
            while let Some(coord) = self.stack.pop() {
                if is_candidate(&self.visited, grid, coord) {
                    return Some(coord);
                }
            }
        }
        None
    }

    fn record_outcome(&mut self, coord: Coord, outcome: ShotOutcome, grid: &Grid) {
        mark_visited(&mut self.visited, coord);
        if outcome.is_hit() {
            for next in coord.neighbors4() {
                if is_candidate(&self.visited, grid, next) {
                    self.stack.push(next);
                }
            }
        }
    }

    fn visited(&self) -> &CellSet {
        &self.visited
    }
}
