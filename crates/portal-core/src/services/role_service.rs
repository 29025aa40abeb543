// ============================================================================
// Portal Core - Role Service
// File: crates/portal-core/src/services/role_service.rs
// ============================================================================
//! Role catalog administration

use std::sync::Arc;

use portal_shared::RoleId;
use tracing::{info, warn};

use crate::domain::{NewRole, Role};
use crate::error::DomainError;
use crate::repositories::{invalidate_menu, MenuCache, RoleRepository};

pub struct RoleService {
    role_repo: Arc<dyn RoleRepository>,
    cache: Arc<dyn MenuCache>,
}

impl RoleService {
    pub fn new(role_repo: Arc<dyn RoleRepository>, cache: Arc<dyn MenuCache>) -> Self {
        Self { role_repo, cache }
    }

    pub async fn list(&self) -> Result<Vec<Role>, DomainError> {
        self.role_repo.list().await
    }

    /// Creates a role with every menu item denied.
    pub async fn create(&self, name: &str) -> Result<Role, DomainError> {
        let new_role = NewRole::new(name)?;

        if self.role_repo.find_by_name(&new_role.name).await?.is_some() {
            warn!("Role creation failed: name already exists: {}", new_role.name);
            return Err(DomainError::RoleNameAlreadyExists(new_role.name));
        }

        let role = self.role_repo.create(&new_role).await?;
        info!("Role created: {} ({})", role.name, role.id);
        Ok(role)
    }

    pub async fn delete(&self, role_id: RoleId) -> Result<(), DomainError> {
        if !self.role_repo.delete(role_id).await? {
            return Err(DomainError::RoleNotFound(role_id));
        }

        invalidate_menu(self.cache.as_ref(), role_id).await?;

        info!("Role deleted: {}", role_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::menu_cache::MockMenuCache;
    use crate::repositories::role_repository::MockRoleRepository;
    use crate::repositories::NoopMenuCache;
    use chrono::Utc;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_trims_and_persists() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_name().withf(|name| name == "Reviewer").returning(|_| Ok(None));
        roles.expect_create().times(1).returning(|new_role| {
            Ok(Role {
                id: 4,
                name: new_role.name.clone(),
                created_at: Utc::now(),
            })
        });

        let svc = RoleService::new(Arc::new(roles), Arc::new(NoopMenuCache));
        let role = svc.create("  Reviewer ").await.unwrap();

        assert_eq!(role.id, 4);
        assert_eq!(role.name, "Reviewer");
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let mut roles = MockRoleRepository::new();
        roles.expect_find_by_name().returning(|name| {
            Ok(Some(Role {
                id: 1,
                name: name.to_string(),
                created_at: Utc::now(),
            }))
        });
        roles.expect_create().never();

        let svc = RoleService::new(Arc::new(roles), Arc::new(NoopMenuCache));

        assert_eq!(
            svc.create("Administrator").await,
            Err(DomainError::RoleNameAlreadyExists("Administrator".to_string()))
        );
    }

    #[tokio::test]
    async fn test_invalid_name_rejected() {
        let svc = RoleService::new(Arc::new(MockRoleRepository::new()), Arc::new(NoopMenuCache));
        assert!(matches!(svc.create("x").await, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_delete_invalidates_cache() {
        let mut roles = MockRoleRepository::new();
        roles.expect_delete().with(eq(3)).returning(|_| Ok(true));
        roles.expect_delete().with(eq(8)).returning(|_| Ok(false));

        let mut cache = MockMenuCache::new();
        cache.expect_invalidate().with(eq(3)).times(1).returning(|_| Ok(1));

        let svc = RoleService::new(Arc::new(roles), Arc::new(cache));

        assert_eq!(svc.delete(3).await, Ok(()));
        assert_eq!(svc.delete(8).await, Err(DomainError::RoleNotFound(8)));
    }

    #[tokio::test]
    async fn test_delete_reports_failed_invalidation() {
        let mut roles = MockRoleRepository::new();
        roles.expect_delete().returning(|_| Ok(true));

        let mut cache = MockMenuCache::new();
        cache
            .expect_invalidate()
            .returning(|_| Err(DomainError::InternalError("connection refused".to_string())));

        let svc = RoleService::new(Arc::new(roles), Arc::new(cache));

        assert!(matches!(
            svc.delete(3).await,
            Err(DomainError::CacheInvalidationFailed(_))
        ));
    }
}
