// ============================================================================
// Portal Core - Role Entity
// File: crates/portal-core/src/domain/role.rs
// Description: Named permission scope assigned to users
// ============================================================================

use portal_shared::constants::{MAX_ROLE_NAME_LENGTH, MIN_ROLE_NAME_LENGTH};
use portal_shared::{RoleId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Persisted role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Role awaiting its database identifier
#[derive(Debug, Clone, Validate)]
pub struct NewRole {
    #[validate(length(
        min = MIN_ROLE_NAME_LENGTH,
        max = MAX_ROLE_NAME_LENGTH,
        message = "Role name must be between 2 and 100 characters"
    ))]
    pub name: String,
}

impl NewRole {
    pub fn new(name: &str) -> Result<Self, validator::ValidationErrors> {
        let role = Self {
            name: name.trim().to_string(),
        };

        role.validate()?;
        Ok(role)
    }
}
