// ============================================================================
// Portal API - Permission Handlers
// File: crates/portal-api/src/handlers/permissions.rs
// ============================================================================
//! Menu resolution and role permission matrix endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::dto::{
    MenuPermissionsResponse, RoleIdQuery, RolePermissionsResponse, SavePermissionsRequest,
    SavePermissionsResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Menu tree handler - GET /permissions/menu?roleId=
pub async fn get_menu(
    State(state): State<AppState>,
    query: Result<Query<RoleIdQuery>, QueryRejection>,
) -> Result<Json<MenuPermissionsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let resolved = state
        .permission_service
        .resolve_menu_or_fallback(query.role_id)
        .await?;

    Ok(Json(MenuPermissionsResponse {
        success: true,
        is_dynamic: resolved.is_dynamic,
        permissions: resolved.nodes,
    }))
}

/// Permission matrix handler - GET /permissions/role?roleId=
pub async fn get_role_permissions(
    State(state): State<AppState>,
    query: Result<Query<RoleIdQuery>, QueryRejection>,
) -> Result<Json<RolePermissionsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let permissions = state.permission_service.role_permissions(query.role_id).await?;

    Ok(Json(RolePermissionsResponse {
        success: true,
        permissions,
    }))
}

/// Save handler - POST /permissions/role
pub async fn save_role_permissions(
    State(state): State<AppState>,
    payload: Result<Json<SavePermissionsRequest>, JsonRejection>,
) -> Result<Json<SavePermissionsResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let saved = state
        .permission_service
        .save_permissions(payload.role_id, payload.permissions)
        .await?;

    Ok(Json(SavePermissionsResponse {
        success: true,
        saved,
    }))
}
