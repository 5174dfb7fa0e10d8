//! # Standing Calculator
//! Composite 0–100 tier score, named tier and streak health.
//!
//! ```text
//! raw = 0.45·avgQuiz + 0.25·mean(modalities) + 0.15·min(100, lessons·4)
//!     + streakBonus + difficultyBonus + completionBonus
//! tierScore = clamp(round(raw / 1.18), 0, 100)
//! ```
//! The 1.18 divisor keeps the nominal ceiling near 100 once the additive
//! bonuses are in; numeric-compatibility tests pin it.

use serde::{Deserialize, Serialize};

use crate::profile::{clamp_score_f64, Difficulty, LearnerTier, PerformanceHistory, StreakHealth};

const W_QUIZ: f64 = 0.45;
const W_MODALITY: f64 = 0.25;
const W_LESSONS: f64 = 0.15;
const LESSON_POINTS: f64 = 4.0;
const STREAK_POINTS: f64 = 1.8;
const STREAK_BONUS_CAP: f64 = 16.0;
const NORMALIZER: f64 = 1.18;

/// Completion ratio assumed when the caller has none.
pub const DEFAULT_COMPLETION_RATIO: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub tier_score: u32,
    pub learner_tier: LearnerTier,
    pub streak_health: StreakHealth,
}

/// Compute the standing. `streak` defaults to 0, `completion_ratio` to 1.
pub fn score(
    performance: &PerformanceHistory,
    streak: Option<u32>,
    completion_ratio: Option<f64>,
) -> Standing {
    let streak = streak.unwrap_or(0);
    let completion = completion_ratio
        .filter(|r| r.is_finite())
        .unwrap_or(DEFAULT_COMPLETION_RATIO);

    let avg = performance.average_quiz_score.min(100) as f64;
    let lessons = (performance.total_lessons_completed as f64 * LESSON_POINTS).min(100.0);

    let raw = W_QUIZ * avg
        + W_MODALITY * performance.modality_mean()
        + W_LESSONS * lessons
        + streak_bonus(streak)
        + difficulty_bonus(performance.current_difficulty)
        + completion_bonus(completion);

    let tier_score = clamp_score_f64(raw / NORMALIZER);

    Standing {
        tier_score,
        learner_tier: tier_for(tier_score),
        streak_health: streak_health(streak),
    }
}

pub fn streak_bonus(streak: u32) -> f64 {
    (streak as f64 * STREAK_POINTS).clamp(0.0, STREAK_BONUS_CAP)
}

pub fn difficulty_bonus(d: Difficulty) -> f64 {
    match d {
        Difficulty::Advanced => 14.0,
        Difficulty::Intermediate => 8.0,
        Difficulty::Beginner => 2.0,
    }
}

pub fn completion_bonus(ratio: f64) -> f64 {
    if ratio >= 0.65 {
        8.0
    } else if ratio >= 0.35 {
        2.0
    } else {
        -8.0
    }
}

pub fn tier_for(tier_score: u32) -> LearnerTier {
    match tier_score {
        85.. => LearnerTier::Legend,
        70..=84 => LearnerTier::Pro,
        50..=69 => LearnerTier::Intermediate,
        _ => LearnerTier::Beginner,
    }
}

pub fn streak_health(streak: u32) -> StreakHealth {
    match streak {
        7.. => StreakHealth::Strong,
        3..=6 => StreakHealth::Warning,
        _ => StreakHealth::Critical,
    }
}

/// One rank down, floored at beginner. Used by the hosting app for
/// inactivity penalties; never called by the engine itself.
pub fn demote(tier: LearnerTier) -> LearnerTier {
    match tier {
        LearnerTier::Legend => LearnerTier::Pro,
        LearnerTier::Pro => LearnerTier::Intermediate,
        LearnerTier::Intermediate | LearnerTier::Beginner => LearnerTier::Beginner,
    }
}
