//! Puzzle generation across four families
//!
//! Families: plain arithmetic (multiple choice), next-number sequences,
//! one-step algebra and a 2x2 grid with one blanked cell. Difficulty
//! (1..=10) widens operand ranges and unlocks the harder operators.
//!
//! Draw order is part of the contract: family first, then each family's
//! fields in a fixed order. Reordering draws changes every daily challenge.

use crate::consts::{CHOICE_COUNT, MAX_CHOICE_ATTEMPTS};
use crate::game::rng::RandomSource;

/// How a puzzle is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleKind {
    /// Four answer buttons, one correct
    MultipleChoice,
    /// Free-form numeric entry
    FreeInput,
}

/// One generated puzzle, immutable once built.
///
/// Judging is string equality between the trimmed submission and `answer`,
/// so `answer` always holds the canonical base-10 rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub kind: PuzzleKind,
    pub prompt: String,
    /// Exactly four entries for multiple choice, empty for free input
    pub choices: Vec<String>,
    pub answer: String,
    /// Hint line shown under the prompt when present
    pub explanation: Option<String>,
}

/// Build one puzzle at the given difficulty tier.
pub fn generate(rng: &mut dyn RandomSource, difficulty: u32) -> Puzzle {
    match rng.below(4) {
        0 => arithmetic(rng, difficulty),
        1 => sequence(rng, difficulty),
        2 => algebra(rng, difficulty),
        _ => grid(rng),
    }
}

const OPS: [char; 4] = ['+', '-', '×', '÷'];

/// Two-operand arithmetic. Multiplication and division only unlock above
/// tier 5; division floors and the prompt says so.
fn arithmetic(rng: &mut dyn RandomSource, difficulty: u32) -> Puzzle {
    let unlocked = if difficulty > 5 { OPS.len() as u32 } else { 2 };
    let op = OPS[rng.below(unlocked) as usize];
    let span = 10 + difficulty * 3;
    let a = i64::from(rng.below(span) + 1);
    let b = i64::from(rng.below(span) + 1);
    let answer = match op {
        '+' => a + b,
        '-' => a - b,
        '×' => a * b,
        // both operands are >= 1, so truncation is floor
        _ => a / b,
    };
    let prompt = if op == '÷' {
        format!("{a} ÷ {b} (rounded down) = ?")
    } else {
        format!("{a} {op} {b} = ?")
    };
    Puzzle {
        kind: PuzzleKind::MultipleChoice,
        prompt,
        choices: build_choices(rng, answer),
        answer: answer.to_string(),
        explanation: None,
    }
}

/// Distractors sit at `answer + delta * scale` with delta in -3..=2 and
/// scale 1 or 2. A degenerate source can repeat the same candidate forever,
/// so after `MAX_CHOICE_ATTEMPTS` draws the remainder is filled outward
/// from the answer instead.
fn build_choices(rng: &mut dyn RandomSource, answer: i64) -> Vec<String> {
    let mut choices = vec![answer];
    let mut attempts = 0;
    while choices.len() < CHOICE_COUNT && attempts < MAX_CHOICE_ATTEMPTS {
        let delta = i64::from(rng.below(6)) - 3;
        let scale = i64::from(rng.below(2)) + 1;
        let candidate = answer + delta * scale;
        if !choices.contains(&candidate) {
            choices.push(candidate);
        }
        attempts += 1;
    }
    let mut k = 1;
    while choices.len() < CHOICE_COUNT {
        if !choices.contains(&(answer + k)) {
            choices.push(answer + k);
        }
        if choices.len() < CHOICE_COUNT && !choices.contains(&(answer - k)) {
            choices.push(answer - k);
        }
        k += 1;
    }
    shuffle(rng, &mut choices);
    choices.iter().map(ToString::to_string).collect()
}

/// Fisher-Yates with one draw per swap, highest index down.
fn shuffle(rng: &mut dyn RandomSource, items: &mut [i64]) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i as u32 + 1) as usize;
        items.swap(i, j);
    }
}

/// Arithmetic or geometric run of four terms; the answer is the fifth.
/// Geometric runs get more likely with difficulty, capped at even odds.
fn sequence(rng: &mut dyn RandomSource, difficulty: u32) -> Puzzle {
    let geometric = rng.next_f64() < (f64::from(difficulty) / 12.0).clamp(0.0, 0.5);
    let start = i64::from(rng.below(6) + 1);
    let step = i64::from(rng.below(if geometric { 4 } else { 8 }) + 2);
    let mut terms = vec![start];
    for i in 1..4 {
        let prev = terms[i - 1];
        terms.push(if geometric { prev * step } else { prev + step });
    }
    let answer = if geometric { terms[3] * step } else { terms[3] + step };
    let joined = terms
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Puzzle {
        kind: PuzzleKind::FreeInput,
        prompt: format!("Find the next number: {joined} , ?"),
        choices: Vec::new(),
        answer: answer.to_string(),
        explanation: None,
    }
}

/// Solve `ax + b = c` for x. All coefficients stay small positive ints.
fn algebra(rng: &mut dyn RandomSource, difficulty: u32) -> Puzzle {
    let a = rng.below(3 + difficulty) + 1;
    let x = rng.below(8 + difficulty) + 1;
    let b = rng.below(10);
    let c = a * x + b;
    Puzzle {
        kind: PuzzleKind::FreeInput,
        prompt: format!("Solve for x: {a}x + {b} = {c}"),
        choices: Vec::new(),
        answer: x.to_string(),
        explanation: None,
    }
}

/// 2x2 grid of consecutive values with one cell blanked. The stated total
/// is the first row's sum; the blanked cell is uniquely determined either
/// way, which is all judging needs.
fn grid(rng: &mut dyn RandomSource) -> Puzzle {
    let base = rng.below(6) + 3;
    let cells = [base, base + 1, base + 2, base + 3];
    let blank = rng.below(4) as usize;
    let total = cells[0] + cells[1];
    let shown: Vec<String> = cells
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i == blank {
                "□".to_string()
            } else {
                v.to_string()
            }
        })
        .collect();
    Puzzle {
        kind: PuzzleKind::FreeInput,
        prompt: format!(
            "Fill the missing number so each row sums to {total}: [{} {}] / [{} {}]",
            shown[0], shown[1], shown[2], shown[3]
        ),
        choices: Vec::new(),
        answer: cells[blank].to_string(),
        explanation: None,
    }
}
