//! Run leaderboard and best-score scalar
//!
//! Persisted to LocalStorage under two keys: a JSON array of every
//! finished run (append-only, play order) and a separate decimal string
//! holding the best score ever, shown in the footer. Reads tolerate
//! anything: absent, truncated or hand-edited values parse as empty or
//! zero, never an error.

use serde::{Deserialize, Serialize};

use crate::platform;

/// LocalStorage key for the run list
const LIST_KEY: &str = "mq_leaderboard";
/// LocalStorage key for the best-score scalar
const BEST_KEY: &str = "mq_best";

/// Rows shown in the leaderboard modal
pub const DISPLAY_ROWS: usize = 10;

/// Which run type produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreMode {
    Arcade,
    Daily,
}

impl ScoreMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Arcade => "Arcade",
            ScoreMode::Daily => "Daily",
        }
    }
}

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u64,
    pub mode: ScoreMode,
    /// Unix timestamp (ms) when the run ended
    #[serde(rename = "ts")]
    pub timestamp: f64,
}

/// Every recorded run, in the order played.
/// Serializes as the bare entry array, which is the stored wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Parse a stored run list. Anything unreadable is an empty board.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<LeaderboardEntry>>(json) {
            Ok(entries) => Self { entries },
            Err(err) => {
                log::debug!("Discarding unreadable leaderboard: {err}");
                Self::new()
            }
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Append a finished run. The stored list keeps every run; ranking
    /// happens in `top` at display time.
    pub fn record(&mut self, score: u64, mode: ScoreMode, timestamp: f64) {
        self.entries.push(LeaderboardEntry {
            score,
            mode,
            timestamp,
        });
    }

    /// Highest `n` scores, best first. Ties keep play order.
    pub fn top(&self, n: usize) -> Vec<LeaderboardEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(n);
        ranked
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the run list from LocalStorage.
    pub fn load() -> Self {
        match platform::storage_get(LIST_KEY) {
            Some(json) => {
                let board = Self::from_json(&json);
                log::info!("Loaded {} leaderboard entries", board.entries.len());
                board
            }
            None => Self::new(),
        }
    }

    /// Save the run list to LocalStorage. Best-effort; a refused write
    /// is logged and forgotten.
    pub fn save(&self) {
        if platform::storage_set(LIST_KEY, &self.to_json()) {
            log::info!("Leaderboard saved ({} entries)", self.entries.len());
        } else {
            log::debug!("Leaderboard not saved, storage unavailable");
        }
    }
}

/// Best score ever recorded on this device, 0 when absent or unreadable.
pub fn best_score() -> u64 {
    parse_best(platform::storage_get(BEST_KEY))
}

/// Raise the stored best if this run beat it; returns the best after the
/// update.
pub fn record_best(score: u64) -> u64 {
    let best = best_score();
    if score > best {
        platform::storage_set(BEST_KEY, &score.to_string());
        score
    } else {
        best
    }
}

fn parse_best(raw: Option<String>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(scores: &[u64]) -> Leaderboard {
        let mut board = Leaderboard::new();
        for (i, &score) in scores.iter().enumerate() {
            board.record(score, ScoreMode::Arcade, 1_000.0 + i as f64);
        }
        board
    }

    #[test]
    fn test_record_appends_in_play_order() {
        let board = board_with(&[30, 10, 20]);
        let scores: Vec<u64> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 10, 20]);
    }

    #[test]
    fn test_top_sorts_descending_and_limits() {
        let board = board_with(&[5, 90, 40, 70, 10]);
        let top: Vec<u64> = board.top(3).iter().map(|e| e.score).collect();
        assert_eq!(top, vec![90, 70, 40]);
        assert_eq!(board.top(100).len(), 5);
    }

    #[test]
    fn test_display_rows_cap_drops_the_weakest_runs() {
        let scores: Vec<u64> = (1..=12).map(|n| n * 10).collect();
        let board = board_with(&scores);
        let shown = board.top(DISPLAY_ROWS);
        assert_eq!(shown.len(), DISPLAY_ROWS);
        assert_eq!(shown[0].score, 120);
        assert_eq!(shown[9].score, 30);
        assert!(shown.iter().all(|e| e.score > 20));
    }

    #[test]
    fn test_top_ties_keep_play_order() {
        let board = board_with(&[50, 50, 50]);
        let stamps: Vec<f64> = board.top(10).iter().map(|e| e.timestamp).collect();
        assert_eq!(stamps, vec![1_000.0, 1_001.0, 1_002.0]);
    }

    #[test]
    fn test_from_json_tolerates_garbage() {
        for junk in ["", "not json", "{\"score\":1}", "[{\"score\":\"high\"}]", "null"] {
            assert!(
                Leaderboard::from_json(junk).is_empty(),
                "accepted junk: {junk:?}"
            );
        }
    }

    #[test]
    fn test_from_json_reads_stored_shape() {
        let json = r#"[{"score":48,"mode":"Daily","ts":1700000000000}]"#;
        let board = Leaderboard::from_json(json);
        assert_eq!(board.entries.len(), 1);
        assert_eq!(board.entries[0].score, 48);
        assert_eq!(board.entries[0].mode, ScoreMode::Daily);
        assert_eq!(board.entries[0].timestamp, 1_700_000_000_000.0);
    }

    #[test]
    fn test_wire_shape_is_a_bare_array_with_ts_field() {
        let board = board_with(&[12]);
        let json = board.to_json();
        assert!(json.starts_with('['), "not an array: {json}");
        assert!(json.contains("\"ts\":"), "missing ts field: {json}");
        assert!(json.contains("\"mode\":\"Arcade\""), "bad mode label: {json}");
        assert_eq!(Leaderboard::from_json(&json).entries, board.entries);
    }

    #[test]
    fn test_parse_best_tolerates_garbage() {
        assert_eq!(parse_best(None), 0);
        assert_eq!(parse_best(Some(String::new())), 0);
        assert_eq!(parse_best(Some("not a number".into())), 0);
        assert_eq!(parse_best(Some("-5".into())), 0);
        assert_eq!(parse_best(Some(" 120 ".into())), 120);
    }

    // Storage is absent off-browser, so the stored best reads as 0 and
    // only the improvement branch can raise the returned value.
    #[test]
    fn test_record_best_keeps_the_higher_score() {
        assert_eq!(record_best(0), 0);
        assert_eq!(record_best(41), 41);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(ScoreMode::Arcade.as_str(), "Arcade");
        assert_eq!(ScoreMode::Daily.as_str(), "Daily");
    }
}
