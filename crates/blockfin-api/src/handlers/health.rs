//! Health check

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Registered LLM providers
    pub providers: Vec<String>,
    pub panels: usize,
}

/// Liveness; does not call upstream providers
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let providers = state
        .insights
        .router()
        .kinds()
        .into_iter()
        .map(|k| k.to_string())
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        providers,
        panels: state.panels.len(),
    })
}
