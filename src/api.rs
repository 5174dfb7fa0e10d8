// src/api.rs
//! Stateless HTTP surface over the engine.
//!
//! Every request carries full snapshots; the service keeps no learner state.
//! Snapshots are sanitized on the way in (clamping, legacy default filling)
//! and the engine never fails, so handlers only reject malformed JSON.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::difficulty::{self, DifficultyDecision};
use crate::metrics::{self, Metrics};
use crate::modality;
use crate::profile::{
    LearnerTier, LearningProfile, Modality, PerformanceHistory, StreakHealth, TopicRecommendation,
};
use crate::prompt;
use crate::recommend;
use crate::standing::{self, Standing};
use crate::streak::{self, InactivityPolicy};
use crate::taxonomy::{Taxonomy, TopicCategory};
use crate::updater::{self, QuizResult};

#[derive(Clone)]
pub struct AppState {
    pub taxonomy: Arc<Taxonomy>,
}

impl AppState {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Taxonomy::default())
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/taxonomy", get(taxonomy))
        .route("/rank", post(rank))
        .route("/difficulty", post(decide_difficulty))
        .route("/standing", post(standing_score))
        .route("/recommend", post(recommend_topics))
        .route("/quiz", post(apply_quiz))
        .route("/prompt", post(course_prompt))
        .route("/streak", post(streak_status))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Full in-process app: taxonomy from config, `/metrics` when enabled.
pub fn app(cfg: &ServiceConfig) -> anyhow::Result<Router> {
    let taxonomy = Taxonomy::load(&cfg.taxonomy_path)?;
    info!(
        target: "engine",
        categories = taxonomy.len(),
        debug_routes = cfg.debug_routes,
        "building router"
    );
    let mut router = create_router(AppState::new(taxonomy));
    if cfg.debug_routes {
        router = router.merge(Metrics::global()?.router());
    }
    Ok(router)
}

/* ----------------------------
Requests / responses
---------------------------- */

#[derive(Deserialize)]
struct RankReq {
    #[serde(default)]
    profile: LearningProfile,
    #[serde(default)]
    performance: PerformanceHistory,
}

#[derive(Deserialize)]
struct DifficultyReq {
    #[serde(default)]
    performance: PerformanceHistory,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StandingReq {
    #[serde(default)]
    performance: PerformanceHistory,
    #[serde(default)]
    streak: Option<u32>,
    #[serde(default)]
    completion_ratio: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendReq {
    #[serde(default)]
    profile: LearningProfile,
    #[serde(default)]
    performance: PerformanceHistory,
    #[serde(default)]
    completed_topics: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuizReq {
    #[serde(default)]
    performance: PerformanceHistory,
    quiz: QuizResult,
    #[serde(default)]
    streak: Option<u32>,
    #[serde(default)]
    completion_ratio: Option<f64>,
}

#[derive(Deserialize)]
struct PromptReq {
    topic: String,
    #[serde(default)]
    profile: LearningProfile,
    #[serde(default)]
    performance: PerformanceHistory,
}

#[derive(Serialize)]
struct PromptResp {
    prompt: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreakReq {
    #[serde(default)]
    active_days: Vec<NaiveDate>,
    today: NaiveDate,
    #[serde(default)]
    tier: Option<LearnerTier>,
    #[serde(default)]
    last_active: Option<NaiveDate>,
    #[serde(default)]
    grace_days: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StreakResp {
    streak: u32,
    streak_health: StreakHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<LearnerTier>,
}

/* ----------------------------
Handlers
---------------------------- */

async fn taxonomy(State(state): State<AppState>) -> Json<Vec<TopicCategory>> {
    Json(state.taxonomy.categories().to_vec())
}

async fn rank(Json(body): Json<RankReq>) -> Json<Vec<Modality>> {
    let perf = body.performance.sanitized();
    Json(modality::rank(&body.profile, &perf))
}

async fn decide_difficulty(Json(body): Json<DifficultyReq>) -> Json<DifficultyDecision> {
    Json(difficulty::decide(&body.performance.sanitized()))
}

async fn standing_score(Json(body): Json<StandingReq>) -> Json<Standing> {
    Json(standing::score(
        &body.performance.sanitized(),
        body.streak,
        body.completion_ratio,
    ))
}

async fn recommend_topics(
    State(state): State<AppState>,
    Json(body): Json<RecommendReq>,
) -> Json<Vec<TopicRecommendation>> {
    let recs = recommend::recommend(
        &state.taxonomy,
        &body.profile,
        &body.performance.sanitized(),
        &body.completed_topics,
    );
    metrics::record_recommendations(recs.len());
    Json(recs)
}

async fn apply_quiz(Json(body): Json<QuizReq>) -> Json<PerformanceHistory> {
    let next = updater::apply(
        &body.performance,
        &body.quiz,
        body.streak,
        body.completion_ratio,
    );
    metrics::record_quiz(next.last_difficulty_change_direction);
    Json(next)
}

async fn course_prompt(Json(body): Json<PromptReq>) -> Json<PromptResp> {
    let text = prompt::course_prompt(&body.topic, &body.profile, &body.performance.sanitized());
    metrics::record_prompt();
    Json(PromptResp { prompt: text })
}

async fn streak_status(Json(body): Json<StreakReq>) -> Json<StreakResp> {
    let n = streak::current_streak(&body.active_days, body.today);
    let last_active = body
        .last_active
        .or_else(|| body.active_days.iter().copied().max());
    let policy = body
        .grace_days
        .map(|grace_days| InactivityPolicy { grace_days })
        .unwrap_or_default();
    let tier = match (body.tier, last_active) {
        (Some(t), Some(last)) => Some(streak::apply_inactivity(t, last, body.today, policy)),
        (t, _) => t,
    };
    Json(StreakResp {
        streak: n,
        streak_health: standing::streak_health(n),
        tier,
    })
}
