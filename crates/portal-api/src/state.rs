use std::sync::Arc;

use portal_core::services::{NotificationService, PermissionService, RoleService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub permission_service: Arc<PermissionService>,
    pub role_service: Arc<RoleService>,
    pub notification_service: Arc<NotificationService>,
}
