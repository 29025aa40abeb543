//! Domain errors

use portal_shared::{MenuItemId, RoleId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Role not found: {0}")]
    RoleNotFound(RoleId),

    #[error("Role name already exists: {0}")]
    RoleNameAlreadyExists(String),

    #[error("Unknown menu item id(s): {0:?}")]
    InvalidMenuItems(Vec<MenuItemId>),

    #[error("Invalid menu catalog: {0}")]
    InvalidCatalog(String),

    #[error("Permission store unavailable: {0}")]
    Unavailable(String),

    #[error("Menu cache could not be invalidated: {0}")]
    CacheInvalidationFailed(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
