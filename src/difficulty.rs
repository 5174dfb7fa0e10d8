//! # Difficulty Adjuster
//! Pure mapping `PerformanceHistory` → `DifficultyDecision`.
//!
//! Policy: no change before 3 completed lessons. After that the rolling
//! average (mean of recent quiz scores when there are at least 3 of them,
//! else the cumulative average) must cross a threshold to move one level:
//! `>= 85` steps up, `< 55` steps down, anything in between stays put.
//!
//! Reason strings are user-facing; their format is pinned by tests.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::{Difficulty, Direction, PerformanceHistory};

pub const MIN_LESSONS_FOR_CHANGE: u32 = 3;
pub const MIN_RECENT_SCORES: usize = 3;
pub const STEP_UP_AT: f64 = 85.0;
pub const STEP_DOWN_BELOW: f64 = 55.0;

pub const INSUFFICIENT_SAMPLE_REASON: &str = "insufficient sample";

/// Difficulty outcome with explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyDecision {
    pub difficulty: Difficulty,
    pub reason: String,
    pub direction: Direction,
}

impl DifficultyDecision {
    fn stay(difficulty: Difficulty, reason: impl Into<String>) -> Self {
        Self {
            difficulty,
            reason: reason.into(),
            direction: Direction::Stable,
        }
    }
}

/// The signal difficulty decisions are gated on.
pub fn rolling_average(performance: &PerformanceHistory) -> f64 {
    let recent = &performance.recent_quiz_scores;
    if recent.len() >= MIN_RECENT_SCORES {
        let sum: u64 = recent.iter().map(|s| (*s).min(100) as u64).sum();
        sum as f64 / recent.len() as f64
    } else {
        performance.average_quiz_score.min(100) as f64
    }
}

/// Decide the next difficulty. Moves at most one level per call.
pub fn decide(performance: &PerformanceHistory) -> DifficultyDecision {
    let current = performance.current_difficulty;

    if performance.total_lessons_completed < MIN_LESSONS_FOR_CHANGE {
        return DifficultyDecision::stay(current, INSUFFICIENT_SAMPLE_REASON);
    }

    let avg = rolling_average(performance);

    let decision = if avg >= STEP_UP_AT {
        match current.harder() {
            Some(next) => DifficultyDecision {
                difficulty: next,
                reason: format!("rolling average {avg:.1} >= 85: stepped up to {next}"),
                direction: Direction::Up,
            },
            None => DifficultyDecision::stay(
                current,
                format!("rolling average {avg:.1} >= 85: already at {current}"),
            ),
        }
    } else if avg < STEP_DOWN_BELOW {
        match current.easier() {
            Some(next) => DifficultyDecision {
                difficulty: next,
                reason: format!("rolling average {avg:.1} < 55: stepped down to {next}"),
                direction: Direction::Down,
            },
            None => DifficultyDecision::stay(
                current,
                format!("rolling average {avg:.1} < 55: already at {current}"),
            ),
        }
    } else {
        DifficultyDecision::stay(
            current,
            format!("rolling average {avg:.1} within 55-85: staying at {current}"),
        )
    };

    if decision.direction != Direction::Stable {
        debug!(
            target: "engine",
            from = %current,
            to = %decision.difficulty,
            rolling_average = avg,
            "difficulty transition"
        );
    }
    decision
}
