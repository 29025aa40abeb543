// ============================================================================
// Portal API - Router
// File: crates/portal-api/src/router.rs
// ============================================================================

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{health, menu_items, notifications, permissions, roles};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let permission_routes = Router::new()
        .route("/permissions/menu", get(permissions::get_menu))
        .route(
            "/permissions/role",
            get(permissions::get_role_permissions).post(permissions::save_role_permissions),
        )
        .route("/roles", get(roles::list_roles).post(roles::create_role))
        .route("/roles/{id}", delete(roles::delete_role))
        .route("/menu-items", get(menu_items::list_menu_items))
        .route(
            "/notifications/ack",
            get(notifications::last_acknowledged).post(notifications::acknowledge),
        );

    Router::new()
        .merge(health_routes)
        .merge(permission_routes)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
}
