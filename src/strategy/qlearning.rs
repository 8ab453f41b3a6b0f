//! Tabular Q-learning opponent.
//!
//! States are the full attacker view of the grid, so nothing learned in one
//! position carries over to another and the table never generalises within
//! a game. Rewards are immediate (+1 hit, -1 miss) with no credit for
//! finishing the game. It plays little better than random.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use rand::{rngs::SmallRng, seq::IndexedRandom, Rng};

use super::{is_candidate, mark_visited, Strategy};
use crate::bitboard::CellSet;
use crate::common::{CellState, Coord, ShotOutcome};
use crate::config::QLearningConfig;
use crate::grid::Grid;

type ActionValues = BTreeMap<Coord, f64>;

#[derive(Debug, Clone, Default)]
pub struct QLearningHunter {
    visited: CellSet,
    config: QLearningConfig,
    table: BTreeMap<String, ActionValues>,
}

impl QLearningHunter {
    pub fn new() -> Self {
        Self::with_config(QLearningConfig::default())
    }

    pub fn with_config(config: QLearningConfig) -> Self {
        Self {
            visited: CellSet::new(),
            config,
            table: BTreeMap::new(),
        }
    }

    /// Number of distinct states seen so far.
    pub fn states_seen(&self) -> usize {
        self.table.len()
    }

    /// Current estimate for firing at `action` in the position shown by `grid`.
    pub fn q_value(&self, grid: &Grid, action: Coord) -> f64 {
        self.table
            .get(&encode_state(grid, None))
            .and_then(|values| values.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    fn random_action(&self, rng: &mut SmallRng, grid: &Grid) -> Option<Coord> {
        let open: Vec<Coord> = Coord::all()
            .filter(|&c| is_candidate(&self.visited, grid, c))
            .collect();
        open.choose(rng).copied()
    }

    /// First candidate with the highest recorded value; unseen actions count as 0.
    fn best_action(&self, state: &str, grid: &Grid) -> Option<Coord> {
        let values = self.table.get(state).filter(|v| !v.is_empty())?;
        let mut best: Option<(Coord, f64)> = None;
        for coord in Coord::all().filter(|&c| is_candidate(&self.visited, grid, c)) {
            let q = values.get(&coord).copied().unwrap_or(0.0);
            if best.map_or(true, |(_, top)| q > top) {
                best = Some((coord, q));
            }
        }
        best.map(|(coord, _)| coord)
    }
}

impl Strategy for QLearningHunter {
    fn name(&self) -> &'static str {
        "RL Computer"
    }

    fn select_target(&mut self, rng: &mut SmallRng, grid: &Grid) -> Option<Coord> {
        if rng.random::<f64>() < self.config.epsilon {
            return self.random_action(rng, grid);
        }
        let state = encode_state(grid, None);
        self.best_action(&state, grid)
            .or_else(|| self.random_action(rng, grid))
    }

    fn record_outcome(&mut self, coord: Coord, outcome: ShotOutcome, grid: &Grid) {
        mark_visited(&mut self.visited, coord);
        let reward = match outcome {
            ShotOutcome::Hit => self.config.hit_reward,
            ShotOutcome::Miss => self.config.miss_reward,
        };
        let state = encode_state(grid, Some(coord));
        let next_state = encode_state(grid, None);
        let next_max = self
            .table
            .get(&next_state)
            .and_then(|values| values.values().copied().reduce(f64::max))
            .unwrap_or(0.0);

        let QLearningConfig {
            learning_rate,
            discount,
            ..
        } = self.config;
        let q = self.table.entry(state).or_default().entry(coord).or_insert(0.0);
        *q = (1.0 - learning_rate) * *q + learning_rate * (reward + discount * next_max);
    }

    fn visited(&self) -> &CellSet {
        &self.visited
    }
}

/// One character per cell of the attacker view, row-major. `hide` is shown
/// as unfired, which reconstructs the position before that shot.
fn encode_state(grid: &Grid, hide: Option<Coord>) -> String {
    Coord::all()
        .map(|c| match grid.state(c) {
            _ if Some(c) == hide => '.',
            CellState::Unknown => '.',
            CellState::Hit => 'T',
            CellState::Miss => 'X',
        })
        .collect()
}
