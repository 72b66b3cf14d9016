//! Session transitions: starting runs, judging, the countdown and serving
//!
//! The host drives these from input events plus a 1 Hz interval. All
//! transitions are synchronous; given the session's randomness they are
//! fully deterministic, which is what the daily-challenge tests lean on.

use crate::consts::*;
use crate::game::puzzle::generate;
use crate::game::rng::{EntropySource, Mulberry32};
use crate::game::state::{
    Judgement, Mode, NextStep, SessionRng, SessionState, difficulty, time_budget,
};

impl SessionState {
    /// Begin an entropy-driven arcade run and serve the first puzzle.
    pub fn start_arcade(&mut self) {
        self.reset(Mode::Arcade, SessionRng::Entropy(EntropySource::new()));
    }

    /// Begin a date-seeded run. Every player passing the same seed sees
    /// the same puzzles in the same order, as long as they answer the
    /// same way (reseeding folds in level and streak).
    pub fn start_daily(&mut self, seed: u32) {
        self.reset(Mode::Daily, SessionRng::Daily { seed });
    }

    fn reset(&mut self, mode: Mode, rng: SessionRng) {
        self.mode = mode;
        self.level = 1;
        self.score = 0;
        self.streak = 0;
        self.lives = STARTING_LIVES;
        self.rng = rng;
        self.next_step = None;
        self.puzzles_served = 0;
        self.serve_puzzle();
    }

    /// Judge a submission against the board.
    ///
    /// Comparison is trimmed string equality, so `" 8 "` matches `"8"`
    /// but `"008"` does not. Returns `None` when there is nothing to
    /// judge: no active run, no puzzle, or the board already judged.
    ///
    /// A correct answer banks `BASE_POINTS`, a time bonus of
    /// `time_left - 1` and `STREAK_POINTS` per streak step already held.
    /// A wrong answer (or timeout) costs a life and the streak; losing
    /// the last life ends the run.
    pub fn submit(&mut self, value: &str) -> Option<Judgement> {
        if !self.is_active() || self.judged() {
            return None;
        }
        let puzzle = self.puzzle.as_ref()?;
        Some(if puzzle.answer.trim() == value.trim() {
            let points = BASE_POINTS
                + u64::from(self.time_left.saturating_sub(1))
                + u64::from(self.streak) * STREAK_POINTS;
            self.score += points;
            self.streak += 1;
            self.next_step = Some(NextStep::LevelUp);
            Judgement::Correct { points }
        } else {
            self.streak = 0;
            self.lives -= 1;
            if self.lives == 0 {
                self.mode = Mode::GameOver;
                Judgement::GameOver {
                    final_score: self.score,
                }
            } else {
                self.next_step = Some(NextStep::Retry);
                Judgement::Incorrect {
                    lives_left: self.lives,
                }
            }
        })
    }

    /// One second of countdown. Hitting zero submits the timeout sentinel,
    /// which judges exactly like a wrong answer. Ticks that land after a
    /// judgement (or outside a run) are ignored, so a life is never lost
    /// twice for one puzzle.
    pub fn on_tick(&mut self) -> Option<Judgement> {
        if !self.is_active() || self.puzzle.is_none() || self.judged() {
            return None;
        }
        if self.time_left > 0 {
            self.time_left -= 1;
        }
        if self.time_left == 0 {
            return self.submit(TIMEOUT_SENTINEL);
        }
        None
    }

    /// Serve the puzzle owed after the reveal pause: level up first for a
    /// correct answer, same level for a miss. Returns true when a new
    /// puzzle was served; no-op unless a judgement is pending and the run
    /// is still live, so the host can call it unconditionally.
    pub fn advance(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(step) = self.next_step.take() else {
            return false;
        };
        if step == NextStep::LevelUp {
            self.level += 1;
        }
        self.serve_puzzle();
        true
    }

    /// Abandon the run and return to the menu. Nothing is recorded.
    pub fn quit(&mut self) {
        self.mode = Mode::Menu;
        self.puzzle = None;
        self.next_step = None;
    }

    fn serve_puzzle(&mut self) {
        let tier = difficulty(self.level, self.streak);
        let puzzle = match &mut self.rng {
            SessionRng::Entropy(source) => generate(source, tier),
            SessionRng::Daily { seed } => {
                // First serve uses the bare date seed; later serves fold in
                // level and streak so the stream depends on the path taken.
                let mut source = if self.puzzles_served == 0 {
                    Mulberry32::new(*seed)
                } else {
                    Mulberry32::new(*seed + self.level + self.streak)
                };
                generate(&mut source, tier)
            }
        };
        self.puzzles_served += 1;
        let budget = time_budget(self.level, self.streak);
        self.time_left = budget;
        self.time_total = budget;
        self.puzzle = Some(puzzle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: u32 = 20240307;

    fn answer(session: &SessionState) -> String {
        session.puzzle.as_ref().unwrap().answer.clone()
    }

    fn prompt(session: &SessionState) -> String {
        session.puzzle.as_ref().unwrap().prompt.clone()
    }

    #[test]
    fn test_start_arcade_serves_first_puzzle() {
        let mut session = SessionState::new();
        session.start_arcade();
        assert_eq!(session.mode, Mode::Arcade);
        assert!(session.is_active());
        assert!(!session.is_daily());
        assert_eq!(session.level, 1);
        assert_eq!(session.lives, STARTING_LIVES);
        assert!(session.puzzle.is_some());
        assert_eq!(session.time_left, 17);
        assert_eq!(session.time_total, 17);
        assert!(!session.judged());
    }

    #[test]
    fn test_submit_outside_a_run_is_ignored() {
        let mut session = SessionState::new();
        assert_eq!(session.submit("5"), None);
        assert_eq!(session.on_tick(), None);
    }

    #[test]
    fn test_correct_answer_banks_points_and_streak() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let first = answer(&session);
        let judgement = session.submit(&first);
        // full budget of 17 held: 10 base + 16 time bonus + no streak yet
        assert_eq!(judgement, Some(Judgement::Correct { points: 26 }));
        assert_eq!(session.score, 26);
        assert_eq!(session.streak, 1);
        assert_eq!(session.lives, STARTING_LIVES);
        assert_eq!(session.level, 1, "level bumps at advance, not submit");
        assert!(session.judged());

        session.advance();
        assert_eq!(session.level, 2);
        assert!(!session.judged());
        assert_eq!(session.time_total, time_budget(2, 1));
    }

    #[test]
    fn test_score_bonus_uses_remaining_time() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        for _ in 0..3 {
            assert_eq!(session.on_tick(), None);
        }
        assert_eq!(session.time_left, 14);
        let first = answer(&session);
        assert_eq!(
            session.submit(&first),
            Some(Judgement::Correct { points: 10 + 13 })
        );
    }

    #[test]
    fn test_streak_bonus_compounds() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let first = answer(&session);
        session.submit(&first);
        session.advance();
        // level 2, streak 1: budget 16, streak bonus 2
        let second = answer(&session);
        assert_eq!(
            session.submit(&second),
            Some(Judgement::Correct { points: 10 + 15 + 2 })
        );
        assert_eq!(session.streak, 2);
    }

    #[test]
    fn test_wrong_answer_costs_life_and_streak() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let first = answer(&session);
        session.submit(&first);
        session.advance();
        assert_eq!(session.streak, 1);

        let judgement = session.submit("definitely wrong");
        assert_eq!(judgement, Some(Judgement::Incorrect { lives_left: 2 }));
        assert_eq!(session.streak, 0);
        assert_eq!(session.level, 2);
        session.advance();
        assert_eq!(session.level, 2, "misses replay the same level");
        assert!(session.puzzle.is_some());
    }

    #[test]
    fn test_three_misses_end_the_run() {
        let mut session = SessionState::new();
        session.start_arcade();
        assert_eq!(
            session.submit("wrong"),
            Some(Judgement::Incorrect { lives_left: 2 })
        );
        session.advance();
        assert_eq!(
            session.submit("wrong"),
            Some(Judgement::Incorrect { lives_left: 1 })
        );
        session.advance();
        assert_eq!(
            session.submit("wrong"),
            Some(Judgement::GameOver { final_score: 0 })
        );
        assert_eq!(session.mode, Mode::GameOver);
        assert_eq!(session.lives, 0);
        assert!(!session.is_active());
        assert_eq!(session.submit("wrong"), None);
        assert_eq!(session.on_tick(), None);
    }

    #[test]
    fn test_submission_is_trimmed() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let padded = format!("  {}  ", answer(&session));
        assert!(matches!(
            session.submit(&padded),
            Some(Judgement::Correct { .. })
        ));
    }

    #[test]
    fn test_leading_zeros_do_not_match() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let zero_padded = format!("0{}", answer(&session));
        assert_eq!(
            session.submit(&zero_padded),
            Some(Judgement::Incorrect { lives_left: 2 })
        );
    }

    #[test]
    fn test_timeout_costs_exactly_one_life() {
        let mut session = SessionState::new();
        session.start_arcade();
        let budget = session.time_total;
        let mut outcome = None;
        for _ in 0..budget {
            outcome = session.on_tick();
        }
        assert_eq!(outcome, Some(Judgement::Incorrect { lives_left: 2 }));
        assert_eq!(session.streak, 0);
        // stale ticks after the judgement change nothing
        assert_eq!(session.on_tick(), None);
        assert_eq!(session.lives, 2);
    }

    #[test]
    fn test_stale_tick_after_submission_is_noop() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let first = answer(&session);
        session.submit(&first);
        let frozen = session.time_left;
        assert_eq!(session.on_tick(), None);
        assert_eq!(session.time_left, frozen);
    }

    #[test]
    fn test_advance_without_judgement_is_noop() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let before = prompt(&session);
        assert!(!session.advance());
        assert_eq!(prompt(&session), before);
        assert_eq!(session.level, 1);
    }

    #[test]
    fn test_advance_after_game_over_is_noop() {
        let mut session = SessionState::new();
        session.start_arcade();
        for _ in 0..STARTING_LIVES {
            session.submit("wrong");
            session.advance();
        }
        assert_eq!(session.mode, Mode::GameOver);
        assert!(!session.advance());
    }

    #[test]
    fn test_arcade_correct_then_miss() {
        let mut session = SessionState::new();
        session.start_arcade();
        let first = answer(&session);
        assert!(matches!(
            session.submit(&first),
            Some(Judgement::Correct { .. })
        ));
        assert!(session.score >= BASE_POINTS);
        assert_eq!(session.streak, 1);
        assert_eq!(session.lives, STARTING_LIVES);
        session.advance();

        session.submit("no");
        assert_eq!(session.streak, 0);
        assert_eq!(session.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_quit_returns_to_menu() {
        let mut session = SessionState::new();
        session.start_arcade();
        session.quit();
        assert_eq!(session.mode, Mode::Menu);
        assert!(session.puzzle.is_none());
        assert_eq!(session.submit("5"), None);
    }

    #[test]
    fn test_daily_first_puzzle_uses_bare_seed() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let direct = generate(&mut Mulberry32::new(SEED), difficulty(1, 0));
        assert_eq!(session.puzzle, Some(direct));
    }

    #[test]
    fn test_daily_reseed_folds_in_level_and_streak() {
        let mut session = SessionState::new();
        session.start_daily(SEED);
        let first = answer(&session);
        session.submit(&first);
        session.advance();
        // level 2, streak 1 after one correct answer
        let direct = generate(&mut Mulberry32::new(SEED + 3), difficulty(2, 1));
        assert_eq!(session.puzzle, Some(direct));
    }

    #[test]
    fn test_daily_runs_replay_identically() {
        let mut a = SessionState::new();
        let mut b = SessionState::new();
        a.start_daily(SEED);
        b.start_daily(SEED);
        for _ in 0..6 {
            assert_eq!(a.puzzle, b.puzzle);
            let shared = answer(&a);
            assert!(matches!(a.submit(&shared), Some(Judgement::Correct { .. })));
            assert!(matches!(b.submit(&shared), Some(Judgement::Correct { .. })));
            a.advance();
            b.advance();
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.level, 7);
    }
}
