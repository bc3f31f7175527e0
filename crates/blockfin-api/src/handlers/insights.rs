//! `POST /api/ai-insights`

use std::sync::Arc;

use axum::{extract::State, Json};
use blockfin_insights::{InsightRequest, InsightResponse};

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

pub async fn ai_insights(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<InsightRequest>,
) -> ApiResult<Json<InsightResponse>> {
    let response = state.insights.generate(request).await?;
    Ok(Json(response))
}
