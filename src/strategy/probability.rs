// Probability heatmap shared by the greedy and optimal hunters.
// Fixed-size storage, no heap allocation except for tie lists.

use alloc::vec::Vec;
use rand::Rng;

use crate::common::Coord;
use crate::config::{GRID_SIZE, NUM_CELLS, PROBABILITY_EPSILON};
use crate::grid::Grid;

/// Believed likelihood of a ship occupying each cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityMatrix {
    weights: [[f64; GRID_SIZE]; GRID_SIZE],
}

impl Default for ProbabilityMatrix {
    fn default() -> Self {
        Self::uniform()
    }
}

impl ProbabilityMatrix {
    /// Uniform prior: 1/100 per cell.
    pub fn uniform() -> Self {
        Self {
            weights: [[1.0 / NUM_CELLS as f64; GRID_SIZE]; GRID_SIZE],
        }
    }

    pub fn get(&self, coord: Coord) -> f64 {
        if coord.in_bounds() {
            self.weights[coord.row][coord.col]
        } else {
            0.0
        }
    }

    pub fn rows(&self) -> &[[f64; GRID_SIZE]; GRID_SIZE] {
        &self.weights
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().flat_map(|row| row.iter()).sum()
    }

    /// Whether the weights sum to one, or are all zero.
    pub fn is_normalized(&self) -> bool {
        let total = self.total();
        total == 0.0 || libm::fabs(total - 1.0) < PROBABILITY_EPSILON
    }

    /// A fired cell can no longer hold an unknown ship segment.
    pub fn clear(&mut self, coord: Coord) {
        if coord.in_bounds() {
            self.weights[coord.row][coord.col] = 0.0;
        }
    }

    pub fn add(&mut self, coord: Coord, amount: f64) {
        if coord.in_bounds() {
            self.weights[coord.row][coord.col] += amount;
        }
    }

    pub fn scale(&mut self, coord: Coord, factor: f64) {
        if coord.in_bounds() {
            self.weights[coord.row][coord.col] *= factor;
        }
    }

    /// Rescale so the weights sum to one. Left untouched when no mass remains.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total <= 0.0 {
            return;
        }
        for row in self.weights.iter_mut() {
            for w in row.iter_mut() {
                *w /= total;
            }
        }
    }

    /// Unfired cells sharing the greatest weight, row-major.
    pub fn maxima(&self, grid: &Grid) -> Vec<Coord> {
        let mut best = f64::NEG_INFINITY;
        let mut ties = Vec::new();
        for coord in grid.unknown_cells() {
            let w = self.get(coord);
            if w > best {
                best = w;
                ties.clear();
                ties.push(coord);
            } else if w == best {
                ties.push(coord);
            }
        }
        ties
    }

    /// Draw an unfired cell with probability proportional to its weight.
    ///
    /// Falls back to a uniform draw over unfired cells when none of them
    /// carries any weight.
    pub fn sample<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Option<Coord> {
        let open: Vec<Coord> = grid.unknown_cells().collect();
        if open.is_empty() {
            return None;
        }
        let total: f64 = open.iter().map(|&c| self.get(c)).sum();
        if total <= 0.0 {
            return Some(open[rng.random_range(0..open.len())]);
        }
        let threshold: f64 = rng.random_range(0.0..total);
        let mut cumulative = 0.0;
        for &coord in &open {
            cumulative += self.get(coord);
            if threshold < cumulative {
                return Some(coord);
            }
        }
        // rounding left the threshold past the last bucket
        open.iter().rev().copied().find(|&c| self.get(c) > 0.0)
    }
}
