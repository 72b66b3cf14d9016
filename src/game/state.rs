//! Session state and the difficulty/time-budget formulas
//!
//! One `SessionState` holds everything a run needs: mode, counters, the
//! puzzle on the board and the session-owned randomness. Transitions live
//! in `progress`.

use crate::consts::*;
use crate::game::puzzle::Puzzle;
use crate::game::rng::EntropySource;

/// Where the session is in its menu/play/game-over cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    /// Entropy-driven run
    Arcade,
    /// Date-seeded run, identical puzzles for every player
    Daily,
    GameOver,
}

/// Outcome of judging one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    /// Points banked for this answer (base + time bonus + streak bonus)
    Correct { points: u64 },
    /// A life lost; the same level is replayed after the reveal pause
    Incorrect { lives_left: u8 },
    /// Last life lost; the run is over and the score is final
    GameOver { final_score: u64 },
}

/// What `advance` owes the board once the reveal pause ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NextStep {
    /// Correct answer: bump the level, then serve
    LevelUp,
    /// Wrong answer with lives left: serve at the same level
    Retry,
}

/// Session-owned randomness. Arcade streams from one entropy source;
/// daily keeps the date seed and derives a fresh generator per puzzle.
#[derive(Debug, Clone)]
pub(crate) enum SessionRng {
    Entropy(EntropySource),
    Daily { seed: u32 },
}

/// Full state of one player session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub mode: Mode,
    /// Starts at 1, bumps on every correct answer
    pub level: u32,
    pub score: u64,
    /// Consecutive correct answers; resets on any miss
    pub streak: u32,
    pub lives: u8,
    /// Puzzle on the board, if one has been served
    pub puzzle: Option<Puzzle>,
    /// Seconds left on the countdown
    pub time_left: u32,
    /// Budget the countdown started from (drives the timer bar)
    pub time_total: u32,
    pub(crate) rng: SessionRng,
    pub(crate) next_step: Option<NextStep>,
    pub(crate) puzzles_served: u32,
}

impl SessionState {
    /// Fresh session sitting at the menu.
    pub fn new() -> Self {
        Self {
            mode: Mode::Menu,
            level: 1,
            score: 0,
            streak: 0,
            lives: STARTING_LIVES,
            puzzle: None,
            time_left: 0,
            time_total: 0,
            rng: SessionRng::Entropy(EntropySource::new()),
            next_step: None,
            puzzles_served: 0,
        }
    }

    /// True while puzzles are being played (arcade or daily).
    pub fn is_active(&self) -> bool {
        matches!(self.mode, Mode::Arcade | Mode::Daily)
    }

    /// Whether this run draws from the date seed. Stays truthful through
    /// game over, which is when the leaderboard label is read.
    pub fn is_daily(&self) -> bool {
        matches!(self.rng, SessionRng::Daily { .. })
    }

    /// True between judging a submission and `advance` serving the next
    /// puzzle. Ticks and submissions are ignored while set.
    pub fn judged(&self) -> bool {
        self.next_step.is_some()
    }

    /// Difficulty tier for the puzzle being served right now.
    pub fn difficulty(&self) -> u32 {
        difficulty(self.level, self.streak)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Difficulty tier from level and streak, clamped to 1..=10.
/// Recomputed at every serve, never stored.
pub fn difficulty(level: u32, streak: u32) -> u32 {
    (1 + level.saturating_sub(1) / 2 + streak / 3).clamp(DIFFICULTY_MIN, DIFFICULTY_MAX)
}

/// Seconds granted for the next puzzle. Pressure from level and streak
/// eats into the base budget, floored so every puzzle stays answerable.
pub fn time_budget(level: u32, streak: u32) -> u32 {
    let pressure = (level + streak / 2).min(TIME_PRESSURE_CAP);
    (TIME_BUDGET_BASE - pressure).clamp(TIME_BUDGET_MIN, TIME_BUDGET_BASE)
}
