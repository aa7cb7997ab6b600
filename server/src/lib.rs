pub mod config;
pub mod errors;
pub mod routes;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, http::HeaderMap, routing::{get, post}, Json, Router};
use resumerag_core::persist::{SledStore, StorePaths};
use resumerag_core::{MemoryStore, Store};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const ROLE_HEADER: &str = "x-role";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub privileged_role: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, privileged_role: &str) -> Self {
        Self { store, privileged_role: Arc::from(privileged_role.to_lowercase()) }
    }

    /// Callers sending `x-role: <privileged role>` (any case) see raw text.
    pub fn is_privileged(&self, headers: &HeaderMap) -> bool {
        headers
            .get(ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_lowercase() == *self.privileged_role)
            .unwrap_or(false)
    }
}

pub fn build_app(config: &Config) -> Result<Router> {
    let store: Arc<dyn Store> = match &config.data_dir {
        Some(dir) => Arc::new(SledStore::open(&StorePaths::new(dir))?),
        None => {
            tracing::warn!("no data directory configured, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };
    let state = AppState::new(store, &config.privileged_role);

    let cors = if config.cors_allow_origin.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<_> = config.cors_allow_origin.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
    };

    Ok(build_router(state).layer(TraceLayer::new_for_http()).layer(cors))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Json(serde_json::json!({ "ok": true })) }))
        .route("/health", get(|| async { "ok" }))
        .route("/api/resumes", get(routes::resumes::list_resumes).post(routes::resumes::create_resumes))
        .route("/api/resumes/ask", post(routes::resumes::ask))
        .route("/api/resumes/:id", get(routes::resumes::get_resume))
        .route("/api/resumes/:id/similar", get(routes::resumes::similar))
        .route("/api/jobs", get(routes::jobs::list_jobs).post(routes::jobs::create_job))
        .route("/api/jobs/:id", get(routes::jobs::get_job))
        .route("/api/jobs/:id/match", post(routes::jobs::match_job))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
