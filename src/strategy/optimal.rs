use alloc::collections::VecDeque;
use rand::rngs::SmallRng;

use super::{is_candidate, mark_visited, ProbabilityMatrix, Strategy};
use crate::bitboard::CellSet;
use crate::common::{CellState, Coord, ShotOutcome};
use crate::config::MISS_REDUCTION;
use crate::grid::Grid;
use crate::ship::Orientation;

/// Heatmap sampler with an axis-locked follow-up queue.
///
/// With nothing queued it samples the heatmap as a categorical
/// distribution. A first hit on a ship queues all four neighbours; once a
/// second adjacent hit reveals the ship's axis, the queue is pruned to that
/// line and extended along it. A miss shrinks the weight of all eight
/// surrounding cells.
#[derive(Debug, Clone, Default)]
pub struct OptimalHunter {
    visited: CellSet,
    heat: ProbabilityMatrix,
    moves: VecDeque<Coord>,
}

impl OptimalHunter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queued follow-up moves, front first.
    pub fn moves(&self) -> &VecDeque<Coord> {
        &self.moves
    }

    pub fn probabilities(&self) -> &ProbabilityMatrix {
        &self.heat
    }

    /// Axis of the ship through `hit`, if an orthogonal neighbour is also a hit.
    /// A vertical neighbour takes precedence.
    pub fn inferred_axis(hit: Coord, grid: &Grid) -> Option<Orientation> {
        let is_hit = |dr, dc| {
            hit.offset(dr, dc)
                .map_or(false, |n| grid.state(n) == CellState::Hit)
        };
        if is_hit(-1, 0) || is_hit(1, 0) {
            Some(Orientation::Vertical)
        } else if is_hit(0, -1) || is_hit(0, 1) {
            Some(Orientation::Horizontal)
        } else {
            None
        }
    }

    fn enqueue(&mut self, coord: Coord, grid: &Grid) {
        if is_candidate(&self.visited, grid, coord) && !self.moves.contains(&coord) {
            self.moves.push_back(coord);
        }
    }

    fn follow_up(&mut self, hit: Coord, grid: &Grid) {
        match Self::inferred_axis(hit, grid) {
            Some(axis) => {
                let visited = self.visited;
                self.moves
                    .retain(|&m| axis.aligned(m, hit) && is_candidate(&visited, grid, m));
                for next in hit.neighbors4().filter(|&n| axis.aligned(n, hit)) {
                    self.enqueue(next, grid);
                }
                log::trace!("axis {:?} locked at {}, queue {:?}", axis, hit, self.moves);
            }
            None => {
                for next in hit.neighbors4() {
                    self.enqueue(next, grid);
                }
            }
        }
    }

    fn decay_around(&mut self, miss: Coord, grid: &Grid) {
        for next in miss.neighbors8().filter(|&n| grid.is_unknown(n)) {
            self.heat.scale(next, 1.0 - MISS_REDUCTION);
        }
    }
}

impl Strategy for OptimalHunter {
    fn name(&self) -> &'static str {
        "Optimal Computer"
    }

    fn select_target(&mut self, rng: &mut SmallRng, grid: &Grid) -> Option<Coord> {
        while let Some(coord) = self.moves.pop_front() {
            if is_candidate(&self.visited, grid, coord) {
                return Some(coord);
            }
        }
        self.heat.sample(grid, rng)
    }

    fn record_outcome(&mut self, coord: Coord, outcome: ShotOutcome, grid: &Grid) {
        mark_visited(&mut self.visited, coord);
        self.heat.clear(coord);
        match outcome {
            ShotOutcome::Hit => {
                self.heat.normalize();
                self.follow_up(coord, grid);
            }
            ShotOutcome::Miss => {
                self.decay_around(coord, grid);
                self.heat.normalize();
                log::trace!("heatmap after miss at {}: {:?}", coord, self.heat.rows());
            }
        }
    }

    fn visited(&self) -> &CellSet {
        &self.visited
    }

    fn heatmap(&self) -> Option<&ProbabilityMatrix> {
        Some(&self.heat)
    }
}
