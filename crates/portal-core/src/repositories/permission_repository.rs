//! Role permission repository trait (port)

use async_trait::async_trait;
use portal_shared::RoleId;
use crate::domain::{PermissionGrant, RolePermission};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn list_for_role(&self, role_id: RoleId) -> Result<Vec<RolePermission>, DomainError>;
    /// Upserts every grant for the role atomically. Returns rows written.
    async fn save_batch(&self, role_id: RoleId, grants: &[PermissionGrant]) -> Result<usize, DomainError>;
}
