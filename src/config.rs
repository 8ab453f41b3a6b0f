use crate::fleet::Layout;
use crate::ship::ShipDef;

pub const GRID_SIZE: usize = 10;
pub const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;

pub const NUM_SHIPS: usize = 7;
pub const FLEET: [ShipDef; NUM_SHIPS] = [
    ShipDef::new("Battleship", 4),
    ShipDef::new("Cruiser", 4),
    ShipDef::new("Destroyer", 3),
    ShipDef::new("Patrol Boat", 2),
    ShipDef::new("Submarine", 3),
    ShipDef::new("Carrier", 5),
    ShipDef::new("Rescue Ship", 2),
];

/// Total number of ship cells in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 4 + 3 + 2 + 3 + 5 + 2;

/// Minimum "thinking" time before a gated strategy may fire.
pub const TURN_COOLDOWN_MS: u64 = 1000;

/// Per-ship attempts and whole-fleet restarts for random deployment.
pub const PLACEMENT_ATTEMPTS: usize = 10;

pub const MINIMAX_DEPTH: u32 = 3;
pub const MINIMAX_HIT_SCORE: i32 = 10;
pub const MINIMAX_MISS_PENALTY: i32 = 5;

pub const HIT_BOOST: f64 = 0.3;
pub const MISS_REDUCTION: f64 = 0.2;

/// Tolerance used when checking that a probability matrix sums to one.
pub const PROBABILITY_EPSILON: f64 = 1e-9;

/// Tuning knobs for the Q-learning opponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QLearningConfig {
    pub epsilon: f64,
    pub learning_rate: f64,
    pub discount: f64,
    pub hit_reward: f64,
    pub miss_reward: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            learning_rate: 0.1,
            discount: 0.9,
            hit_reward: 1.0,
            miss_reward: -1.0,
        }
    }
}

/// Runtime settings for a [`crate::Match`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub cooldown_ms: u64,
    pub human_layout: Layout,
    pub computer_layout: Layout,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: TURN_COOLDOWN_MS,
            human_layout: Layout::Random,
            computer_layout: Layout::Random,
        }
    }
}

/// Look up a fleet entry by name, case-insensitively.
pub fn ship_def(name: &str) -> Option<ShipDef> {
    FLEET
        .iter()
        .copied()
        .find(|def| def.name().eq_ignore_ascii_case(name))
}
