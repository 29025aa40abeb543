// ============================================================================
// Portal API - Role Handlers
// File: crates/portal-api/src/handlers/roles.rs
// ============================================================================

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use portal_core::domain::Role;
use portal_shared::RoleId;
use validator::Validate;

use crate::dto::CreateRoleRequest;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /roles
pub async fn list_roles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Role>>>, ApiError> {
    let roles = state.role_service.list().await?;
    Ok(Json(ApiResponse::success(roles)))
}

/// POST /roles
pub async fn create_role(
    State(state): State<AppState>,
    payload: Result<Json<CreateRoleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Role>>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    payload
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let role = state.role_service.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(role))))
}

/// DELETE /roles/{id}
pub async fn delete_role(
    State(state): State<AppState>,
    Path(role_id): Path<RoleId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.role_service.delete(role_id).await?;
    Ok(Json(ApiResponse::success(())))
}
