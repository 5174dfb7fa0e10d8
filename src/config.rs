// src/config.rs
//! Service configuration from environment (+ `.env` via dotenvy in main).
//!
//! - `TAXONOMY_CONFIG_PATH`  optional taxonomy TOML (default `config/taxonomy.toml`)
//! - `DEBUG_ROUTES=1`        mount `/metrics`
//! - `ENGINE_DEV_LOG=1`      compact tracing, dev environments only
//!
//! None of this reaches the engine modules; they take plain values.

use std::path::PathBuf;

use crate::taxonomy::{DEFAULT_TAXONOMY_CONFIG_PATH, ENV_TAXONOMY_CONFIG_PATH};

pub const ENV_DEBUG_ROUTES: &str = "DEBUG_ROUTES";
pub const ENV_DEV_LOG: &str = "ENGINE_DEV_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub taxonomy_path: PathBuf,
    pub debug_routes: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            taxonomy_path: PathBuf::from(DEFAULT_TAXONOMY_CONFIG_PATH),
            debug_routes: false,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let taxonomy_path = std::env::var(ENV_TAXONOMY_CONFIG_PATH)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TAXONOMY_CONFIG_PATH));
        Self {
            taxonomy_path,
            debug_routes: env_flag(ENV_DEBUG_ROUTES),
        }
    }
}

/// `"1"` / `"true"` (any case) → true.
fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| {
            let v = v.trim();
            v == "1" || v.eq_ignore_ascii_case("true")
        })
        .unwrap_or(false)
}

/// Debug build, or SHUTTLE_ENV in {local, development, dev}.
pub fn is_dev_env() -> bool {
    cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        )
}

// Dev logging gate: ENGINE_DEV_LOG=1 AND dev env
pub fn dev_logging_enabled() -> bool {
    env_flag(ENV_DEV_LOG) && is_dev_env()
}

/// Short, stable id for free text that must not be logged raw.
pub fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
