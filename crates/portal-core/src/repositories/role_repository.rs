//! Role repository trait (port)

use async_trait::async_trait;
use portal_shared::RoleId;
use crate::domain::{NewRole, Role};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DomainError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError>;
    async fn list(&self) -> Result<Vec<Role>, DomainError>;
    /// Inserts the role and an all-false permission row for every menu item.
    async fn create(&self, role: &NewRole) -> Result<Role, DomainError>;
    /// Returns false when no such role existed. Permission rows go with it.
    async fn delete(&self, id: RoleId) -> Result<bool, DomainError>;
}
