//! Turn scheduling for a human versus computer match.
//!
//! The scheduler never sleeps. Callers pass a monotonic timestamp in
//! milliseconds and poll once per frame; a gated opponent reports how long
//! it is still "thinking" until the cooldown has elapsed.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use rand::{rngs::SmallRng, Rng};

use crate::common::{Coord, GridError, PlacementError, ShotEvent, Side};
use crate::config::MatchConfig;
use crate::grid::Grid;
use crate::strategy::{decide_and_fire, OpponentKind, Strategy, TurnError};

/// Minimum delay between control passing to a strategy and its shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownGate {
    cooldown_ms: u64,
    armed_at: u64,
}

impl CooldownGate {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            armed_at: 0,
        }
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    /// Start a new window at `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.armed_at = now_ms;
    }

    /// Milliseconds left before the gate opens. Zero once open.
    pub fn remaining(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.armed_at);
        self.cooldown_ms.saturating_sub(elapsed)
    }

    pub fn is_open(&self, now_ms: u64) -> bool {
        self.remaining(now_ms) == 0
    }
}

/// Overall state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStatus {
    InProgress,
    HumanWon,
    ComputerWon,
    /// The strategy found nothing left to fire at.
    OpponentExhausted,
}

impl MatchStatus {
    pub fn is_finished(self) -> bool {
        self != MatchStatus::InProgress
    }
}

/// Result of polling the opponent for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPoll {
    /// Control is with the human; nothing to do.
    HumanTurn,
    /// The opponent is waiting out its cooldown.
    Thinking { remaining_ms: u64 },
    /// The opponent fired one shot and returned control.
    Fired(ShotEvent),
    Finished(MatchStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    NotYourTurn,
    Finished(MatchStatus),
    Grid(GridError),
}

impl From<GridError> for MatchError {
    fn from(e: GridError) -> Self {
        MatchError::Grid(e)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NotYourTurn => write!(f, "wait for the opponent to fire"),
            MatchError::Finished(status) => write!(f, "match is over ({:?})", status),
            MatchError::Grid(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

/// A human against one computer strategy.
///
/// `human_grid` holds the human's fleet and is attacked by the strategy;
/// `computer_grid` holds the computer's fleet and is attacked by the human.
pub struct Match {
    config: MatchConfig,
    kind: OpponentKind,
    opponent: Box<dyn Strategy>,
    human_grid: Grid,
    computer_grid: Grid,
    human_turn: bool,
    gate: CooldownGate,
    status: MatchStatus,
    history: Vec<ShotEvent>,
}

impl Match {
    /// Deploy both fleets from the configured layouts. The human moves first.
    pub fn new<R: Rng + ?Sized>(
        kind: OpponentKind,
        config: MatchConfig,
        rng: &mut R,
    ) -> Result<Self, PlacementError> {
        let human_grid = config.human_layout.deploy(rng)?;
        let computer_grid = config.computer_layout.deploy(rng)?;
        Ok(Self::from_grids(kind, config, human_grid, computer_grid))
    }

    /// Start a match on prepared grids.
    pub fn from_grids(
        kind: OpponentKind,
        config: MatchConfig,
        human_grid: Grid,
        computer_grid: Grid,
    ) -> Self {
        let mut m = Self {
            config,
            kind,
            opponent: kind.build(),
            human_grid,
            computer_grid,
            human_turn: true,
            gate: CooldownGate::new(config.cooldown_ms),
            status: MatchStatus::InProgress,
            history: Vec::new(),
        };
        m.refresh_status();
        m
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn opponent_kind(&self) -> OpponentKind {
        self.kind
    }

    pub fn opponent(&self) -> &dyn Strategy {
        self.opponent.as_ref()
    }

    pub fn human_grid(&self) -> &Grid {
        &self.human_grid
    }

    pub fn computer_grid(&self) -> &Grid {
        &self.computer_grid
    }

    pub fn is_human_turn(&self) -> bool {
        self.human_turn
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Every shot of the match, oldest first.
    pub fn history(&self) -> &[ShotEvent] {
        &self.history
    }

    pub fn shots_by(&self, side: Side) -> usize {
        self.history.iter().filter(|e| e.shooter == side).count()
    }

    /// Fire at the computer's grid. A shot at a resolved cell is rejected
    /// and the human keeps the turn.
    pub fn human_fire(&mut self, coord: Coord, now_ms: u64) -> Result<ShotEvent, MatchError> {
        if self.status.is_finished() {
            return Err(MatchError::Finished(self.status));
        }
        if !self.human_turn {
            return Err(MatchError::NotYourTurn);
        }
        let outcome = self.computer_grid.fire(coord)?;
        let event = ShotEvent {
            shooter: Side::Human,
            coord,
            outcome,
        };
        log::debug!("human fires at {} -> {:?}", coord, outcome);
        self.history.push(event);
        self.human_turn = false;
        self.gate.arm(now_ms);
        self.refresh_status();
        Ok(event)
    }

    /// Let the opponent act if it is its turn and its cooldown has elapsed.
    pub fn poll_opponent(&mut self, now_ms: u64, rng: &mut SmallRng) -> TurnPoll {
        if self.status.is_finished() {
            return TurnPoll::Finished(self.status);
        }
        if self.human_turn {
            return TurnPoll::HumanTurn;
        }
        if self.opponent.requires_cooldown() && !self.gate.is_open(now_ms) {
            return TurnPoll::Thinking {
                remaining_ms: self.gate.remaining(now_ms),
            };
        }
        match decide_and_fire(self.opponent.as_mut(), rng, &mut self.human_grid) {
            Ok((coord, outcome)) => {
                let event = ShotEvent {
                    shooter: Side::Computer,
                    coord,
                    outcome,
                };
                self.history.push(event);
                self.human_turn = true;
                self.refresh_status();
                TurnPoll::Fired(event)
            }
            Err(TurnError::GameOver) => {
                self.status = MatchStatus::ComputerWon;
                TurnPoll::Finished(self.status)
            }
            Err(e) => {
                log::warn!("{} gave up: {}", self.opponent.name(), e);
                self.status = MatchStatus::OpponentExhausted;
                TurnPoll::Finished(self.status)
            }
        }
    }

    /// Replace the strategy with a fresh instance of `kind`. Grids and turn
    /// ownership are kept.
    pub fn switch_opponent(&mut self, kind: OpponentKind) {
        log::info!("opponent switched from {} to {}", self.kind, kind);
        self.kind = kind;
        self.opponent = kind.build();
        if self.status == MatchStatus::OpponentExhausted {
            self.status = MatchStatus::InProgress;
            self.refresh_status();
        }
    }

    /// Start over: new fleets, a fresh strategy, human to move.
    pub fn redeploy<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), PlacementError> {
        self.human_grid = self.config.human_layout.deploy(rng)?;
        self.computer_grid = self.config.computer_layout.deploy(rng)?;
        self.opponent = self.kind.build();
        self.human_turn = true;
        self.history.clear();
        self.status = MatchStatus::InProgress;
        self.refresh_status();
        log::info!("fleets redeployed against {}", self.kind);
        Ok(())
    }

    fn refresh_status(&mut self) {
        if self.status.is_finished() {
            return;
        }
        self.status = if self.computer_grid.is_game_over() {
            MatchStatus::HumanWon
        } else if self.human_grid.is_game_over() {
            MatchStatus::ComputerWon
        } else {
            MatchStatus::InProgress
        };
        if self.status.is_finished() {
            log::info!("match finished: {:?}", self.status);
        }
    }
}
