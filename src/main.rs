//! Adaptive Learning Engine: Binary Entrypoint
//! Boots the Axum HTTP server over the stateless engine.
//!
//! See `README.md` for the route list and `DESIGN.md` for module notes.

use adaptive_learning_engine::{api, config, ServiceConfig};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact tracing logs, dev only: needs ENGINE_DEV_LOG=1 and a dev environment.
fn enable_dev_tracing() {
    if !config::dev_logging_enabled() {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("engine=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = ServiceConfig::from_env();
    let router = api::app(&cfg).expect("Failed to build router (taxonomy config?)");

    Ok(router.into())
}
