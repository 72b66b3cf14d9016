//! MathQuest: The Number Trials - a browser arithmetic puzzle gauntlet
//!
//! Core modules:
//! - `game`: Deterministic puzzle generation and session progression
//! - `leaderboard`: Locally persisted score list and best-score scalar
//! - `audio`: Web Audio feedback for answer outcomes (wasm only)
//! - `platform`: Browser/native abstraction for time, date and storage

pub mod game;
pub mod leaderboard;
pub mod platform;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use game::puzzle::{Puzzle, PuzzleKind};
pub use game::rng::{EntropySource, Mulberry32, RandomSource, daily_seed};
pub use game::state::{Judgement, Mode, SessionState, difficulty, time_budget};
pub use leaderboard::{Leaderboard, LeaderboardEntry, ScoreMode};

/// Game rule constants
pub mod consts {
    /// Lives at the start of every session
    pub const STARTING_LIVES: u8 = 3;

    /// Flat points for any correct answer (time and streak bonuses on top)
    pub const BASE_POINTS: u64 = 10;
    /// Extra points per streak step held when answering
    pub const STREAK_POINTS: u64 = 2;

    /// Countdown bounds in seconds - budgets shrink with level and streak
    pub const TIME_BUDGET_BASE: u32 = 18;
    pub const TIME_BUDGET_MIN: u32 = 6;
    /// Cap on the level/streak pressure subtracted from the base budget
    pub const TIME_PRESSURE_CAP: u32 = 12;

    /// Difficulty tier bounds fed to the puzzle generator
    pub const DIFFICULTY_MIN: u32 = 1;
    pub const DIFFICULTY_MAX: u32 = 10;

    /// Answer choices shown for a multiple-choice puzzle
    pub const CHOICE_COUNT: usize = 4;
    /// Distractor draws before falling back to `answer ± k`
    pub const MAX_CHOICE_ATTEMPTS: u32 = 100;

    /// Pause between judging a puzzle and serving the next (host-driven)
    pub const REVEAL_DELAY_MS: i32 = 220;

    /// Submitted in place of an answer when the countdown expires.
    /// Real answers are integer strings, so this can never match one.
    pub const TIMEOUT_SENTINEL: &str = "__timeout__";
}
