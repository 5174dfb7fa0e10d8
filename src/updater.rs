//! # Performance Updater
//! The single reducer of the engine: `(snapshot, quiz result)` → new snapshot.
//!
//! Order matters and is fixed:
//! 1. EMA on the scored modality (α = 0.3)
//! 2. exact cumulative average over `total + 1` samples
//! 3. strong / weak topic bookkeeping (disjoint, last 5 each)
//! 4. recent scores window (last 5)
//! 5. trend vs. the previous average (±3)
//! 6. difficulty decision on the partially updated snapshot
//! 7. standing on the fully updated snapshot
//!
//! The input is never mutated. Applying the same result twice is two state
//! transitions, not one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::difficulty;
use crate::profile::{
    clamp_score, clamp_score_f64, keep_last, same_topic, Direction, Modality, PerformanceHistory,
    RECENT_SCORES_WINDOW, TOPIC_MEMORY,
};
use crate::standing;

const EMA_ALPHA: f64 = 0.3;
pub const STRONG_AT: u32 = 80;
pub const WEAK_BELOW: u32 = 50;
const TREND_DELTA: i64 = 3;

/// A just-completed quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    /// 0–100; larger values are clamped.
    pub score: u32,
    pub modality: Modality,
    pub topic: String,
}

impl QuizResult {
    pub fn new(score: u32, modality: Modality, topic: impl Into<String>) -> Self {
        Self {
            score,
            modality,
            topic: topic.into(),
        }
    }
}

/// Apply one quiz result and return the next snapshot.
///
/// `streak` and `completion_ratio` feed the standing calculation and default
/// the same way as in [`standing::score`].
pub fn apply(
    performance: &PerformanceHistory,
    quiz: &QuizResult,
    streak: Option<u32>,
    completion_ratio: Option<f64>,
) -> PerformanceHistory {
    let mut next = performance.clone().sanitized();
    let score = clamp_score(quiz.score);
    let old_average = next.average_quiz_score;

    // 1) modality EMA
    let slot = next.modality_score_mut(quiz.modality);
    *slot = ema(*slot, score);

    // 2) cumulative average
    let n = next.total_lessons_completed as u64;
    let total = old_average as u64 * n + score as u64;
    next.average_quiz_score = clamp_score_f64(total as f64 / (n + 1) as f64);
    next.total_lessons_completed = next.total_lessons_completed.saturating_add(1);

    // 3) strong / weak topics
    classify_topic(&mut next, &quiz.topic, score);

    // 4) recent window
    next.recent_quiz_scores.push(score);
    keep_last(&mut next.recent_quiz_scores, RECENT_SCORES_WINDOW);

    // 5) trend
    next.trend = trend(old_average, next.average_quiz_score);

    // 6) difficulty
    let decision = difficulty::decide(&next);
    next.current_difficulty = decision.difficulty;
    next.difficulty_change_reason = decision.reason;
    next.last_difficulty_change_direction = decision.direction;

    // 7) standing
    let st = standing::score(&next, streak, completion_ratio);
    next.tier_score = st.tier_score;
    next.learner_tier = st.learner_tier;
    next.streak_health = st.streak_health;

    debug!(
        target: "engine",
        topic = %crate::config::anon_hash(&quiz.topic),
        score,
        lessons = next.total_lessons_completed,
        average = next.average_quiz_score,
        difficulty = %next.current_difficulty,
        tier = next.learner_tier.as_str(),
        "quiz result applied"
    );

    next
}

/// new = round(old·0.7 + score·0.3)
pub fn ema(old: u32, score: u32) -> u32 {
    clamp_score_f64(old.min(100) as f64 * (1.0 - EMA_ALPHA) + score as f64 * EMA_ALPHA)
}

fn trend(old_average: u32, new_average: u32) -> Direction {
    let delta = new_average as i64 - old_average as i64;
    if delta >= TREND_DELTA {
        Direction::Up
    } else if delta <= -TREND_DELTA {
        Direction::Down
    } else {
        Direction::Stable
    }
}

fn classify_topic(p: &mut PerformanceHistory, topic: &str, score: u32) {
    let t = topic.trim().to_lowercase();
    if t.is_empty() {
        return;
    }

    if score >= STRONG_AT {
        p.weak_topics.retain(|w| !same_topic(w, &t));
        if !p.strong_topics.iter().any(|s| same_topic(s, &t)) {
            p.strong_topics.push(t);
        }
    } else if score < WEAK_BELOW {
        p.strong_topics.retain(|s| !same_topic(s, &t));
        if !p.weak_topics.iter().any(|w| same_topic(w, &t)) {
            p.weak_topics.push(t);
        }
    }

    keep_last(&mut p.strong_topics, TOPIC_MEMORY);
    keep_last(&mut p.weak_topics, TOPIC_MEMORY);
}
