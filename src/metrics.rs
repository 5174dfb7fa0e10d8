//! Prometheus exposition for the service shell.
//!
//! Counters are recorded by the API layer only; engine modules stay free of
//! side effects. The recorder can be installed once per process, so the
//! handle lives in a `OnceCell` and every router build reuses it.

use axum::{routing::get, Router};
use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use crate::profile::Direction;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

static METRICS: OnceCell<Metrics> = OnceCell::new();

impl Metrics {
    /// Install the Prometheus recorder (first call) and describe the series.
    pub fn global() -> anyhow::Result<&'static Metrics> {
        METRICS.get_or_try_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
            describe();
            Ok(Metrics { handle })
        })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe() {
    describe_counter!(
        "engine_quiz_results_total",
        "Quiz results applied to performance snapshots."
    );
    describe_counter!(
        "engine_difficulty_changes_total",
        "Difficulty transitions produced by quiz results, by direction."
    );
    describe_counter!(
        "engine_recommendations_total",
        "Topic recommendations returned."
    );
    describe_counter!("engine_prompts_total", "Course prompts assembled.");
}

pub fn record_quiz(direction: Direction) {
    counter!("engine_quiz_results_total").increment(1);
    let label = match direction {
        Direction::Up => "up",
        Direction::Down => "down",
        Direction::Stable => return,
    };
    counter!("engine_difficulty_changes_total", "direction" => label).increment(1);
}

pub fn record_recommendations(n: usize) {
    counter!("engine_recommendations_total").increment(n as u64);
}

pub fn record_prompt() {
    counter!("engine_prompts_total").increment(1);
}
