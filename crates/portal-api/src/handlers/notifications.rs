// ============================================================================
// Portal API - Notification Acknowledgement Handlers
// File: crates/portal-api/src/handlers/notifications.rs
// ============================================================================

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::dto::{AcknowledgeRequest, AcknowledgementDto, UserIdQuery};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /notifications/ack?userId=
pub async fn last_acknowledged(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<AcknowledgementDto>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let ack = state
        .notification_service
        .last_acknowledged(query.user_id)
        .await?;

    Ok(Json(ApiResponse::success(AcknowledgementDto {
        user_id: query.user_id,
        acknowledged_at: ack.map(|a| a.acknowledged_at),
    })))
}

/// POST /notifications/ack
pub async fn acknowledge(
    State(state): State<AppState>,
    payload: Result<Json<AcknowledgeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AcknowledgementDto>>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let ack = state.notification_service.acknowledge(payload.user_id).await?;

    Ok(Json(ApiResponse::success(AcknowledgementDto {
        user_id: ack.user_id,
        acknowledged_at: Some(ack.acknowledged_at),
    })))
}
