//! Depth-limited minimax with alpha-beta pruning over simulated shots.
//!
//! The attacker (maximising) and an adversarial "defender" (minimising)
//! take turns picking unfired cells. A position is scored as
//! `+10` per hit and `-5` per miss over the whole grid. The search runs on a
//! private copy of the grid with apply/undo, so the real grid is never
//! touched and the result depends only on the grid and the visited set.
//!
//! Simulated shots resolve against the true ship layout: the searcher
//! knows which unfired cells hold a ship. Of all the opponents it is the
//! only one that does.

use rand::rngs::SmallRng;

use super::{mark_visited, Strategy};
use crate::bitboard::CellSet;
use crate::common::{Coord, ShotOutcome};
use crate::config::{MINIMAX_DEPTH, MINIMAX_HIT_SCORE, MINIMAX_MISS_PENALTY};
use crate::grid::{Cell, Grid};

/// Adversarial searcher. Decides immediately; it is not cooldown gated.
#[derive(Debug, Clone)]
pub struct MinimaxSearcher {
    visited: CellSet,
    depth: u32,
}

impl Default for MinimaxSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimaxSearcher {
    pub fn new() -> Self {
        Self::with_depth(MINIMAX_DEPTH)
    }

    /// Searcher looking `depth` plies past its own candidate shot.
    pub fn with_depth(depth: u32) -> Self {
        Self {
            visited: CellSet::new(),
            depth,
        }
    }

    /// The first coordinate, in row-major order, with the greatest score.
    pub fn best_move(&self, grid: &Grid) -> Option<(Coord, i32)> {
        let mut search = Search::new(grid, &self.visited);
        let mut best: Option<(Coord, i32)> = None;
        for coord in Coord::all() {
            if !search.legal(coord) {
                continue;
            }
            let prev = search.apply(coord);
            let score = search.minimax(self.depth, false, i32::MIN, i32::MAX);
            search.undo(coord, prev);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((coord, score));
            }
        }
        best
    }
}

impl Strategy for MinimaxSearcher {
    fn name(&self) -> &'static str {
        "Minimax Computer"
    }

    fn requires_cooldown(&self) -> bool {
        false
    }

    fn select_target(&mut self, _rng: &mut SmallRng, grid: &Grid) -> Option<Coord> {
        self.best_move(grid).map(|(coord, score)| {
            log::trace!("minimax picks {} with score {}", coord, score);
            coord
        })
    }

    fn record_outcome(&mut self, coord: Coord, _outcome: ShotOutcome, _grid: &Grid) {
        mark_visited(&mut self.visited, coord);
    }

    fn visited(&self) -> &CellSet {
        &self.visited
    }
}

/// Scratch position with an incrementally maintained score.
struct Search<'a> {
    board: Grid,
    visited: &'a CellSet,
    score: i32,
    ships_left: usize,
}

impl<'a> Search<'a> {
    fn new(grid: &Grid, visited: &'a CellSet) -> Self {
        let score = grid.count(Cell::Hit) as i32 * MINIMAX_HIT_SCORE
            - grid.count(Cell::Miss) as i32 * MINIMAX_MISS_PENALTY;
        Self {
            board: *grid,
            visited,
            score,
            ships_left: grid.remaining_ship_cells(),
        }
    }

    fn legal(&self, coord: Coord) -> bool {
        !self.visited.contains(coord) && self.board.is_unknown(coord)
    }

    fn apply(&mut self, coord: Coord) -> Cell {
        let prev = self.board.get(coord).unwrap_or(Cell::Miss);
        let next = if prev == Cell::Ship {
            self.score += MINIMAX_HIT_SCORE;
            self.ships_left -= 1;
            Cell::Hit
        } else {
            self.score -= MINIMAX_MISS_PENALTY;
            Cell::Miss
        };
        let _ = self.board.set(coord, next);
        prev
    }

    fn undo(&mut self, coord: Coord, prev: Cell) {
        if prev == Cell::Ship {
            self.score -= MINIMAX_HIT_SCORE;
            self.ships_left += 1;
        } else {
            self.score += MINIMAX_MISS_PENALTY;
        }
        let _ = self.board.set(coord, prev);
    }

    fn minimax(&mut self, depth: u32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        if depth == 0 || self.ships_left == 0 {
            return self.score;
        }
        let mut best: Option<i32> = None;
        for coord in Coord::all() {
            if !self.legal(coord) {
                continue;
            }
            let prev = self.apply(coord);
            let value = self.minimax(depth - 1, !maximizing, alpha, beta);
            self.undo(coord, prev);

            if maximizing {
                best = Some(best.map_or(value, |b| b.max(value)));
                alpha = alpha.max(value);
            } else {
                best = Some(best.map_or(value, |b| b.min(value)));
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }
        // no legal child: the position is a leaf
        best.unwrap_or(self.score)
    }
}
