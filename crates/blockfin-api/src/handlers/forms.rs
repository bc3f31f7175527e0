//! AI-DAO deposit and chart-scan upload

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use blockfin_panels::{ChartScan, ChartUpload, Deposit, ValidationError, MAX_UPLOAD_BYTES};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    /// As typed into the form
    #[serde(default)]
    pub amount: String,
}

/// `POST /api/dao/deposit`
pub async fn dao_deposit(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<DepositRequest>,
) -> ApiResult<Json<Deposit>> {
    let deposit = state.dao.deposit(&request.amount).await?;
    Ok(Json(deposit))
}

/// `POST /api/chart-scan`
///
/// A body over the route's limit raises the same "File Too Large" toast as
/// an upload caught by validation.
pub async fn chart_scan(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChartUpload>, JsonRejection>,
) -> ApiResult<Json<ChartScan>> {
    let upload = match payload {
        Ok(Json(upload)) => upload,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            let err = state.chart_scanner.reject(ValidationError::UploadTooLarge {
                limit: MAX_UPLOAD_BYTES,
            });
            return Err(err.into());
        }
        Err(rejection) => return Err(ApiError::BadRequest(rejection.body_text())),
    };

    let scan = state.chart_scanner.scan(upload).await?;
    Ok(Json(scan))
}
