//! Request and response payloads

use portal_core::domain::{MenuNode, PermissionGrant, RolePermission};
use portal_shared::constants::{MAX_ROLE_NAME_LENGTH, MIN_ROLE_NAME_LENGTH};
use portal_shared::{RoleId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct RoleIdQuery {
    #[serde(rename = "roleId")]
    pub role_id: RoleId,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

/// `GET /permissions/menu`
#[derive(Debug, Serialize)]
pub struct MenuPermissionsResponse {
    pub success: bool,
    #[serde(rename = "isDynamic")]
    pub is_dynamic: bool,
    pub permissions: Vec<MenuNode>,
}

/// `GET /permissions/role`
#[derive(Debug, Serialize)]
pub struct RolePermissionsResponse {
    pub success: bool,
    pub permissions: Vec<RolePermission>,
}

/// `POST /permissions/role`
#[derive(Debug, Deserialize)]
pub struct SavePermissionsRequest {
    #[serde(rename = "roleId")]
    pub role_id: RoleId,
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,
}

#[derive(Debug, Serialize)]
pub struct SavePermissionsResponse {
    pub success: bool,
    pub saved: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoleRequest {
    #[validate(length(
        min = MIN_ROLE_NAME_LENGTH,
        max = MAX_ROLE_NAME_LENGTH,
        message = "Role name must be between 2 and 100 characters"
    ))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AcknowledgeRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct AcknowledgementDto {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "acknowledgedAt")]
    pub acknowledged_at: Option<Timestamp>,
}
