// src/lib.rs
// Public library surface for the service binary, the demo and integration tests.

pub mod api;
pub mod config;
pub mod difficulty;
pub mod metrics;
pub mod modality;
pub mod normalize;
pub mod profile;
pub mod prompt;
pub mod recommend;
pub mod standing;
pub mod streak;
pub mod taxonomy;
pub mod updater;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::ServiceConfig;
pub use crate::difficulty::DifficultyDecision;
pub use crate::profile::{
    Difficulty, Direction, LearnerTier, LearningProfile, Modality, PerformanceHistory,
    RecommendationCategory, StreakHealth, TopicRecommendation,
};
pub use crate::standing::Standing;
pub use crate::taxonomy::{Taxonomy, TopicCategory};
pub use crate::updater::QuizResult;

/// Build the full in-process app from the environment (used by tests).
pub fn app() -> anyhow::Result<axum::Router> {
    api::app(&ServiceConfig::from_env())
}
