//! Route definitions

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use blockfin_panels::MAX_UPLOAD_BYTES;

use crate::handlers;
use crate::state::AppState;

/// Body limit of `POST /api/chart-scan`: a full-size image as a base64
/// data URL fits with room to spare
pub const CHART_SCAN_BODY_LIMIT: usize = 2 * MAX_UPLOAD_BYTES as usize;

/// Routes under `/api`
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ai-insights", post(handlers::insights::ai_insights))
        .nest("/panels", panel_routes())
        .route("/dao/deposit", post(handlers::forms::dao_deposit))
        .route(
            "/chart-scan",
            post(handlers::forms::chart_scan).layer(DefaultBodyLimit::max(CHART_SCAN_BODY_LIMIT)),
        )
        .route("/events", get(handlers::events::event_stream))
}

fn panel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::panels::list_panels))
        .route("/:kind", get(handlers::panels::get_panel))
        .route("/:kind/start", post(handlers::panels::start_panel))
        .route("/:kind/stop", post(handlers::panels::stop_panel))
        .route("/:kind/reset", post(handlers::panels::reset_panel))
}
