#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod common;
mod config;
mod fleet;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod scheduler;
mod ship;
pub mod strategy;
#[cfg(feature = "std")]
mod ui;

pub use bitboard::{BitBoard, BitBoardError, CellSet};
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LogFilter, LOG_ENV};
pub use scheduler::*;
pub use ship::*;
pub use strategy::{
    decide_and_fire, BacktrackingHunter, DfsHunter, GreedyHunter, MinimaxSearcher, OpponentKind,
    OptimalHunter, ProbabilityMatrix, QLearningHunter, Strategy, TurnError,
};
#[cfg(feature = "std")]
pub use ui::*;
