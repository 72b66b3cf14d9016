//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness comes only from the session-owned `RandomSource`
//! - The puzzle generator draws in a fixed order (daily parity depends on it)
//! - Mutation happens only through the session transition entry points
//! - No rendering or platform dependencies

pub mod progress;
pub mod puzzle;
pub mod rng;
pub mod state;

pub use puzzle::{Puzzle, PuzzleKind, generate};
pub use rng::{EntropySource, Mulberry32, RandomSource, daily_seed};
pub use state::{Judgement, Mode, SessionState, difficulty, time_budget};
