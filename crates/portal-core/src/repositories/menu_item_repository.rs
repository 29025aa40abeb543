//! Menu item repository trait (port)

use async_trait::async_trait;
use portal_shared::MenuItemId;
use crate::domain::MenuItem;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// Active items ordered by sort order, then id.
    async fn list_active(&self) -> Result<Vec<MenuItem>, DomainError>;
    /// The subset of `ids` present in the catalog, active or not.
    async fn existing_ids(&self, ids: &[MenuItemId]) -> Result<Vec<MenuItemId>, DomainError>;
}
