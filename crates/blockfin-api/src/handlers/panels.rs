//! Panel control endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use blockfin_panels::RunInput;
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::extractors::OptionalJson;
use crate::state::AppState;

/// `GET /api/panels`
pub async fn list_panels(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Value>>> {
    Ok(Json(state.panels.snapshots().await?))
}

/// `GET /api/panels/:kind`
pub async fn get_panel(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<Json<Value>> {
    let panel = state.panels.get_by_name(&kind)?;
    Ok(Json(panel.snapshot_json().await?))
}

/// `POST /api/panels/:kind/start`
pub async fn start_panel(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    OptionalJson(input): OptionalJson<RunInput>,
) -> ApiResult<Json<Value>> {
    let panel = state.panels.get_by_name(&kind)?;
    let run_id = panel.start(input).await?;
    Ok(Json(json!({
        "runId": run_id,
        "panel": panel.snapshot_json().await?,
    })))
}

/// `POST /api/panels/:kind/stop`
pub async fn stop_panel(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<Json<Value>> {
    let panel = state.panels.get_by_name(&kind)?;
    panel.stop().await?;
    Ok(Json(panel.snapshot_json().await?))
}

/// `POST /api/panels/:kind/reset`
pub async fn reset_panel(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> ApiResult<Json<Value>> {
    let panel = state.panels.get_by_name(&kind)?;
    panel.reset().await;
    Ok(Json(panel.snapshot_json().await?))
}
