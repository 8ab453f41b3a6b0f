//! Computer opponent strategies.
//!
//! Every strategy follows the same turn contract: look at the attacker's
//! view of the grid, name one unfired coordinate, and update its own model
//! once the outcome of that shot is known. [`decide_and_fire`] drives one
//! such turn against a grid.
//!
//! - [`DfsHunter`]: exhaustive stack sweep that dives into hit neighbours
//! - [`BacktrackingHunter`]: random restarts, then depth-first along a ship
//! - [`MinimaxSearcher`]: depth-limited alpha-beta over simulated shots
//! - [`GreedyHunter`]: argmax over a reactive probability heatmap
//! - [`OptimalHunter`]: sampled heatmap plus axis-locked follow-up queue
//! - [`QLearningHunter`]: epsilon-greedy tabular Q-learning

use alloc::boxed::Box;
use core::fmt;
use rand::rngs::SmallRng;

use crate::bitboard::CellSet;
use crate::common::{Coord, ShotOutcome};
use crate::grid::Grid;

pub mod backtracking;
pub mod dfs;
pub mod greedy;
pub mod minimax;
pub mod optimal;
pub mod probability;
pub mod qlearning;

pub use backtracking::BacktrackingHunter;
pub use dfs::DfsHunter;
pub use greedy::GreedyHunter;
pub use minimax::MinimaxSearcher;
pub use optimal::OptimalHunter;
pub use probability::ProbabilityMatrix;
pub use qlearning::QLearningHunter;

/// Interface implemented by every computer opponent.
pub trait Strategy: Send {
    /// Display name.
    fn name(&self) -> &'static str;

    /// Whether the strategy must wait out the thinking cooldown before firing.
    fn requires_cooldown(&self) -> bool {
        true
    }

    /// Choose the next coordinate to fire at, or `None` when no legal move exists.
    ///
    /// The returned coordinate must be unfired and outside [`Strategy::visited`].
    fn select_target(&mut self, rng: &mut SmallRng, grid: &Grid) -> Option<Coord>;

    /// Inform the strategy of the outcome of its last shot. `grid` already
    /// reflects the shot.
    fn record_outcome(&mut self, coord: Coord, outcome: ShotOutcome, grid: &Grid);

    /// Coordinates this instance has fired upon.
    fn visited(&self) -> &CellSet;

    /// The strategy's current heatmap, if it keeps one.
    fn heatmap(&self) -> Option<&ProbabilityMatrix> {
        None
    }
}

/// Why a strategy could not complete its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// No unfired ship cell remains.
    GameOver,
    /// The strategy found no legal coordinate.
    Exhausted,
    /// The strategy named a coordinate that was already fired upon.
    IllegalTarget(Coord),
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::GameOver => write!(f, "every ship has already been hit"),
            TurnError::Exhausted => write!(f, "no legal move left"),
            TurnError::IllegalTarget(c) => write!(f, "strategy chose resolved cell {}", c),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TurnError {}

/// Run one turn: select, fire, and feed the outcome back to the strategy.
pub fn decide_and_fire(
    strategy: &mut dyn Strategy,
    rng: &mut SmallRng,
    grid: &mut Grid,
) -> Result<(Coord, ShotOutcome), TurnError> {
    if grid.is_game_over() {
        return Err(TurnError::GameOver);
    }
    let coord = strategy
        .select_target(rng, grid)
        .ok_or(TurnError::Exhausted)?;
    debug_assert!(
        grid.is_unknown(coord) && !strategy.visited().contains(coord),
        "{} chose resolved cell {}",
        strategy.name(),
        coord
    );
    if strategy.visited().contains(coord) {
        return Err(TurnError::IllegalTarget(coord));
    }
    let outcome = grid
        .fire(coord)
        .map_err(|_| TurnError::IllegalTarget(coord))?;
    log::debug!("{} fires at {} -> {:?}", strategy.name(), coord, outcome);
    strategy.record_outcome(coord, outcome, grid);
    debug_assert!(strategy.visited().contains(coord));
    Ok((coord, outcome))
}

/// Selectable opponent modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum, serde::Serialize, serde::Deserialize))]
pub enum OpponentKind {
    Dfs,
    Backtracking,
    Minimax,
    Greedy,
    Optimal,
    #[cfg_attr(feature = "std", value(alias = "rl"))]
    QLearning,
}

impl OpponentKind {
    pub const ALL: [OpponentKind; 6] = [
        OpponentKind::Dfs,
        OpponentKind::Backtracking,
        OpponentKind::Minimax,
        OpponentKind::Greedy,
        OpponentKind::Optimal,
        OpponentKind::QLearning,
    ];

    /// A fresh strategy instance with no accumulated state.
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            OpponentKind::Dfs => Box::new(DfsHunter::new()),
            OpponentKind::Backtracking => Box::new(BacktrackingHunter::new()),
            OpponentKind::Minimax => Box::new(MinimaxSearcher::new()),
            OpponentKind::Greedy => Box::new(GreedyHunter::new()),
            OpponentKind::Optimal => Box::new(OptimalHunter::new()),
            OpponentKind::QLearning => Box::new(QLearningHunter::new()),
        }
    }
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpponentKind::Dfs => "dfs",
            OpponentKind::Backtracking => "backtracking",
            OpponentKind::Minimax => "minimax",
            OpponentKind::Greedy => "greedy",
            OpponentKind::Optimal => "optimal",
            OpponentKind::QLearning => "q-learning",
        };
        f.write_str(name)
    }
}

/// Record a fired coordinate. Firing the same cell twice, or off the grid,
/// breaks the turn contract.
pub(crate) fn mark_visited(visited: &mut CellSet, coord: Coord) {
    let fresh = visited.insert(coord);
    debug_assert!(
        matches!(fresh, Ok(true)),
        "{} visited twice or off the grid: {:?}",
        coord,
        fresh
    );
}

/// Unfired and not yet visited by this strategy.
pub(crate) fn is_candidate(visited: &CellSet, grid: &Grid, coord: Coord) -> bool {
    !visited.contains(coord) && grid.is_unknown(coord)
}
