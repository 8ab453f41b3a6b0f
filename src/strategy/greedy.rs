use alloc::vec::Vec;
use rand::{rngs::SmallRng, seq::IndexedRandom};

use super::{mark_visited, ProbabilityMatrix, Strategy};
use crate::bitboard::CellSet;
use crate::common::{Coord, ShotOutcome};
use crate::config::{HIT_BOOST, MISS_REDUCTION};
use crate::grid::Grid;

/// Greedy heatmap hunter: always fires at a highest-weight cell.
///
/// A hit adds a fixed boost to each unfired orthogonal neighbour, a miss
/// shrinks them, and the matrix is renormalised after every shot.
#[derive(Debug, Clone, Default)]
pub struct GreedyHunter {
    visited: CellSet,
    heat: ProbabilityMatrix,
}

impl GreedyHunter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probabilities(&self) -> &ProbabilityMatrix {
        &self.heat
    }

    fn update(&mut self, coord: Coord, outcome: ShotOutcome, grid: &Grid) {
        self.heat.clear(coord);
        for next in coord.neighbors4().filter(|&n| grid.is_unknown(n)) {
            match outcome {
                ShotOutcome::Hit => self.heat.add(next, HIT_BOOST),
                ShotOutcome::Miss => self.heat.scale(next, 1.0 - MISS_REDUCTION),
            }
        }
        self.heat.normalize();
    }
}

impl Strategy for GreedyHunter {
    fn name(&self) -> &'static str {
        "Greedy Computer"
    }

    fn select_target(&mut self, rng: &mut SmallRng, grid: &Grid) -> Option<Coord> {
        let visited = self.visited;
        let ties: Vec<Coord> = self
            .heat
            .maxima(grid)
            .into_iter()
            .filter(|&c| !visited.contains(c))
            .collect();
        ties.choose(rng).copied()
    }

    fn record_outcome(&mut self, coord: Coord, outcome: ShotOutcome, grid: &Grid) {
        mark_visited(&mut self.visited, coord);
        self.update(coord, outcome, grid);
    }

    fn visited(&self) -> &CellSet {
        &self.visited
    }

    fn heatmap(&self) -> Option<&ProbabilityMatrix> {
        Some(&self.heat)
    }
}
