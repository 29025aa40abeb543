use axum::{extract::State, Json};
use portal_core::domain::MenuItem;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /menu-items
pub async fn list_menu_items(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MenuItem>>>, ApiError> {
    let items = state.permission_service.menu_items().await?;
    Ok(Json(ApiResponse::success(items)))
}
