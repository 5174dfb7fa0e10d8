//! profile.rs: Learner snapshots consumed and produced by the engine.
//!
//! `LearningProfile` is edited rarely by the hosting app; `PerformanceHistory`
//! is threaded through the updater once per finished quiz. Both travel whole:
//! there is no partial-update API. Field names serialize as camelCase so the
//! stored documents of the hosting app deserialize directly.

use serde::{Deserialize, Serialize};

/// Capacity of strongTopics / weakTopics.
pub const TOPIC_MEMORY: usize = 5;
/// Capacity of recentQuizScores.
pub const RECENT_SCORES_WINDOW: usize = 5;
/// Baseline modality score for a learner nobody has measured yet.
pub const BASELINE_MODALITY_SCORE: u32 = 50;

/// Content-delivery style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Visual,
    Reading,
    #[serde(alias = "hands-on", alias = "hands_on")]
    Handson,
    Listening,
}

impl Modality {
    /// Declaration order; also the tie-break order of the ranker.
    pub const ALL: [Modality; 4] = [
        Modality::Visual,
        Modality::Reading,
        Modality::Handson,
        Modality::Listening,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Visual => "visual",
            Modality::Reading => "reading",
            Modality::Handson => "handson",
            Modality::Listening => "listening",
        }
    }
}

/// Coarse content complexity, totally ordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// One level up; `None` at the ceiling.
    pub fn harder(self) -> Option<Self> {
        match self {
            Difficulty::Beginner => Some(Difficulty::Intermediate),
            Difficulty::Intermediate => Some(Difficulty::Advanced),
            Difficulty::Advanced => None,
        }
    }

    /// One level down; `None` at the floor.
    pub fn easier(self) -> Option<Self> {
        match self {
            Difficulty::Beginner => None,
            Difficulty::Intermediate => Some(Difficulty::Beginner),
            Difficulty::Advanced => Some(Difficulty::Intermediate),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite standing label, totally ordered for step demotion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LearnerTier {
    #[default]
    Beginner,
    Intermediate,
    Pro,
    Legend,
}

impl LearnerTier {
    pub fn as_str(self) -> &'static str {
        match self {
            LearnerTier::Beginner => "beginner",
            LearnerTier::Intermediate => "intermediate",
            LearnerTier::Pro => "pro",
            LearnerTier::Legend => "legend",
        }
    }
}

/// Direction of a change (average trend or last difficulty step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    #[default]
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakHealth {
    Strong,
    Warning,
    #[default]
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnglishLevel {
    Beginner,
    Intermediate,
    Advanced,
    Native,
}

/// Who the learner is. Caller-owned, read-only for the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProfile {
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub grade_level: String,
    /// Non-exclusive stated preferences.
    #[serde(default)]
    pub learning_styles: Vec<Modality>,
    /// Taxonomy category keys, in the order the learner picked them.
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_level: Option<EnglishLevel>,
}

fn default_language() -> String {
    "English".to_string()
}

impl Default for LearningProfile {
    fn default() -> Self {
        Self {
            age: 0,
            country: String::new(),
            grade_level: String::new(),
            learning_styles: Vec::new(),
            interests: Vec::new(),
            language: default_language(),
            english_level: None,
        }
    }
}

impl LearningProfile {
    pub fn prefers(&self, m: Modality) -> bool {
        self.learning_styles.contains(&m)
    }
}

/// Measured performance of one learner.
///
/// Every field added after the first schema carries a serde default, so the
/// older document shape (no tier/trend/streakHealth/recentQuizScores) loads
/// as-is and gets filled here, at the ingestion boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceHistory {
    #[serde(default = "baseline")]
    pub visual_score: u32,
    #[serde(default = "baseline")]
    pub reading_score: u32,
    #[serde(default = "baseline")]
    pub handson_score: u32,
    #[serde(default = "baseline")]
    pub listening_score: u32,
    #[serde(default)]
    pub average_quiz_score: u32,
    #[serde(default)]
    pub total_lessons_completed: u32,
    #[serde(default)]
    pub current_difficulty: Difficulty,
    #[serde(default)]
    pub strong_topics: Vec<String>,
    #[serde(default)]
    pub weak_topics: Vec<String>,
    /// Most recent last.
    #[serde(default)]
    pub recent_quiz_scores: Vec<u32>,
    #[serde(default)]
    pub tier_score: u32,
    #[serde(default)]
    pub learner_tier: LearnerTier,
    #[serde(default)]
    pub trend: Direction,
    #[serde(default)]
    pub streak_health: StreakHealth,
    #[serde(default)]
    pub difficulty_change_reason: String,
    #[serde(default)]
    pub last_difficulty_change_direction: Direction,
}

fn baseline() -> u32 {
    BASELINE_MODALITY_SCORE
}

impl Default for PerformanceHistory {
    fn default() -> Self {
        Self {
            visual_score: BASELINE_MODALITY_SCORE,
            reading_score: BASELINE_MODALITY_SCORE,
            handson_score: BASELINE_MODALITY_SCORE,
            listening_score: BASELINE_MODALITY_SCORE,
            average_quiz_score: 0,
            total_lessons_completed: 0,
            current_difficulty: Difficulty::Beginner,
            strong_topics: Vec::new(),
            weak_topics: Vec::new(),
            recent_quiz_scores: Vec::new(),
            tier_score: 0,
            learner_tier: LearnerTier::Beginner,
            trend: Direction::Stable,
            streak_health: StreakHealth::Critical,
            difficulty_change_reason: String::new(),
            last_difficulty_change_direction: Direction::Stable,
        }
    }
}

impl PerformanceHistory {
    pub fn modality_score(&self, m: Modality) -> u32 {
        match m {
            Modality::Visual => self.visual_score,
            Modality::Reading => self.reading_score,
            Modality::Handson => self.handson_score,
            Modality::Listening => self.listening_score,
        }
    }

    pub fn modality_score_mut(&mut self, m: Modality) -> &mut u32 {
        match m {
            Modality::Visual => &mut self.visual_score,
            Modality::Reading => &mut self.reading_score,
            Modality::Handson => &mut self.handson_score,
            Modality::Listening => &mut self.listening_score,
        }
    }

    /// Mean of the four modality scores, each capped at 100.
    pub fn modality_mean(&self) -> f64 {
        let sum: u32 = Modality::ALL
            .iter()
            .map(|m| self.modality_score(*m).min(100))
            .sum();
        sum as f64 / Modality::ALL.len() as f64
    }

    /// Clamp scores into range and restore the list invariants.
    ///
    /// A topic listed as both strong and weak keeps only its strong
    /// membership. Lists are cut to their most recent entries.
    pub fn sanitized(mut self) -> Self {
        for m in Modality::ALL {
            let s = self.modality_score_mut(m);
            *s = clamp_score(*s);
        }
        self.average_quiz_score = clamp_score(self.average_quiz_score);
        self.tier_score = clamp_score(self.tier_score);
        for s in self.recent_quiz_scores.iter_mut() {
            *s = clamp_score(*s);
        }

        let strong = &self.strong_topics;
        self.weak_topics
            .retain(|w| !strong.iter().any(|s| same_topic(s, w)));

        keep_last(&mut self.strong_topics, TOPIC_MEMORY);
        keep_last(&mut self.weak_topics, TOPIC_MEMORY);
        keep_last(&mut self.recent_quiz_scores, RECENT_SCORES_WINDOW);
        self
    }
}

/// Which section of the recommendation list an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Recommended,
    Challenge,
    Explore,
    Continue,
}

/// One suggested topic. Produced fresh per call, never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecommendation {
    pub topic: String,
    pub reason: String,
    pub icon: String,
    pub category: RecommendationCategory,
}

/// Clamp into [0, 100].
pub fn clamp_score(x: u32) -> u32 {
    x.min(100)
}

/// Round and clamp a float into [0, 100]. NaN maps to 0.
pub fn clamp_score_f64(x: f64) -> u32 {
    if x.is_nan() {
        return 0;
    }
    x.round().clamp(0.0, 100.0) as u32
}

/// Topic identity for strong/weak bookkeeping: trimmed, case-insensitive.
pub(crate) fn same_topic(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Drop oldest entries so that at most `cap` remain.
pub(crate) fn keep_last<T>(v: &mut Vec<T>, cap: usize) {
    if v.len() > cap {
        let excess = v.len() - cap;
        v.drain(0..excess);
    }
}
