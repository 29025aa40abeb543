// ============================================================================
// Portal Core - Permission Service
// File: crates/portal-core/src/services/permission_service.rs
// ============================================================================
//! Role → menu tree resolution and admin permission saves

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use portal_shared::{MenuItemId, RoleId};
use tracing::{debug, info, warn};

use crate::domain::{build_menu_forest, FallbackMenu, MenuItem, MenuNode, PermissionGrant, RolePermission};
use crate::error::DomainError;
use crate::repositories::{
    invalidate_menu, MenuCache, MenuItemRepository, PermissionRepository, RoleRepository,
};

/// Resolves and saves per-role menu capabilities
pub struct PermissionService {
    role_repo: Arc<dyn RoleRepository>,
    menu_repo: Arc<dyn MenuItemRepository>,
    permission_repo: Arc<dyn PermissionRepository>,
    cache: Arc<dyn MenuCache>,
    fallback: FallbackMenu,
}

/// Menu returned to the navigation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMenu {
    /// False when the static fallback was served.
    pub is_dynamic: bool,
    pub nodes: Vec<MenuNode>,
}

impl PermissionService {
    pub fn new(
        role_repo: Arc<dyn RoleRepository>,
        menu_repo: Arc<dyn MenuItemRepository>,
        permission_repo: Arc<dyn PermissionRepository>,
        cache: Arc<dyn MenuCache>,
        fallback: FallbackMenu,
    ) -> Self {
        Self {
            role_repo,
            menu_repo,
            permission_repo,
            cache,
            fallback,
        }
    }

    /// Builds the permission-annotated menu forest for a role.
    pub async fn resolve_menu(&self, role_id: RoleId) -> Result<Vec<MenuNode>, DomainError> {
        // Read before the store so a concurrent save moves later lookups past this entry.
        let generation = match self.cache.generation(role_id).await {
            Ok(generation) => Some(generation),
            Err(e) => {
                warn!("Menu cache generation read failed for role {}: {}", role_id, e);
                None
            }
        };

        if let Some(generation) = generation {
            match self.cache.get(role_id, generation).await {
                Ok(Some(menu)) => {
                    debug!("Menu cache hit for role {} (generation {})", role_id, generation);
                    return Ok(menu);
                }
                Ok(None) => {}
                Err(e) => warn!("Menu cache read failed for role {}: {}", role_id, e),
            }
        }

        self.require_role(role_id).await?;

        let items = self.menu_repo.list_active().await?;
        let permissions = self.permission_repo.list_for_role(role_id).await?;
        let menu = build_menu_forest(&items, &permissions);

        if let Some(generation) = generation {
            if let Err(e) = self.cache.put(role_id, generation, &menu).await {
                warn!("Menu cache write failed for role {}: {}", role_id, e);
            }
        }

        debug!("Resolved {} top-level menu node(s) for role {}", menu.len(), role_id);
        Ok(menu)
    }

    /// Like [`resolve_menu`](Self::resolve_menu), but serves the configured
    /// static menu when the store is unreachable.
    pub async fn resolve_menu_or_fallback(&self, role_id: RoleId) -> Result<ResolvedMenu, DomainError> {
        match self.resolve_menu(role_id).await {
            Ok(nodes) => Ok(ResolvedMenu { is_dynamic: true, nodes }),
            Err(DomainError::Unavailable(reason)) => {
                warn!(
                    "Permission store unavailable, serving static menu for role {}: {}",
                    role_id, reason
                );
                Ok(ResolvedMenu {
                    is_dynamic: false,
                    nodes: self.fallback.for_role(role_id),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Flat permission matrix for the editing UI, one row per active menu item.
    pub async fn role_permissions(&self, role_id: RoleId) -> Result<Vec<RolePermission>, DomainError> {
        self.require_role(role_id).await?;

        let items = self.menu_repo.list_active().await?;
        let stored: HashMap<MenuItemId, RolePermission> = self
            .permission_repo
            .list_for_role(role_id)
            .await?
            .into_iter()
            .map(|p| (p.menu_item_id, p))
            .collect();

        Ok(items
            .iter()
            .map(|item| {
                stored
                    .get(&item.id)
                    .cloned()
                    .unwrap_or_else(|| RolePermission::denied(role_id, item.id))
            })
            .collect())
    }

    /// Active menu catalog.
    pub async fn menu_items(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.menu_repo.list_active().await
    }

    /// Upserts capability flags for one role, all or nothing.
    ///
    /// A menu item listed more than once keeps its last entry. If the menu
    /// cache cannot be invalidated after the rows are committed, the call
    /// fails with `CacheInvalidationFailed`; saving again is safe.
    pub async fn save_permissions(
        &self,
        role_id: RoleId,
        grants: Vec<PermissionGrant>,
    ) -> Result<usize, DomainError> {
        info!("Saving {} permission entries for role {}", grants.len(), role_id);

        self.require_role(role_id).await?;

        let grants = dedupe_last_wins(grants);
        let requested: Vec<MenuItemId> = grants.iter().map(|g| g.menu_item_id).collect();

        if !requested.is_empty() {
            let existing: BTreeSet<MenuItemId> =
                self.menu_repo.existing_ids(&requested).await?.into_iter().collect();
            let invalid: Vec<MenuItemId> = requested
                .iter()
                .copied()
                .filter(|id| !existing.contains(id))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            if !invalid.is_empty() {
                warn!("Rejected permission save for role {}: unknown menu items {:?}", role_id, invalid);
                return Err(DomainError::InvalidMenuItems(invalid));
            }
        }

        let saved = self.permission_repo.save_batch(role_id, &grants).await?;

        invalidate_menu(self.cache.as_ref(), role_id).await?;

        info!("Saved {} permission row(s) for role {}", saved, role_id);
        Ok(saved)
    }

    async fn require_role(&self, role_id: RoleId) -> Result<(), DomainError> {
        match self.role_repo.find_by_id(role_id).await? {
            Some(_) => Ok(()),
            None => {
                warn!("Role not found: {}", role_id);
                Err(DomainError::RoleNotFound(role_id))
            }
        }
    }
}

fn dedupe_last_wins(grants: Vec<PermissionGrant>) -> Vec<PermissionGrant> {
    let mut position: HashMap<MenuItemId, usize> = HashMap::new();
    let mut out: Vec<PermissionGrant> = Vec::with_capacity(grants.len());
    for grant in grants {
        match position.get(&grant.menu_item_id) {
            Some(&i) => out[i] = grant,
            None => {
                position.insert(grant.menu_item_id, out.len());
                out.push(grant);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Capabilities, MenuKey, Role};
    use crate::repositories::menu_cache::MockMenuCache;
    use crate::repositories::menu_item_repository::MockMenuItemRepository;
    use crate::repositories::permission_repository::MockPermissionRepository;
    use crate::repositories::role_repository::MockRoleRepository;
    use crate::repositories::NoopMenuCache;
    use chrono::Utc;
    use mockall::predicate::eq;
    use portal_shared::config::{FallbackEntrySettings, FallbackSettings};

    fn role(id: RoleId) -> Role {
        Role {
            id,
            name: "Contributor".to_string(),
            created_at: Utc::now(),
        }
    }

    fn item(id: MenuItemId, key: MenuKey, sort_order: i32) -> MenuItem {
        MenuItem {
            id,
            key,
            label: key.as_str().to_string(),
            path: format!("/{}", key.as_str()),
            icon: key.default_icon(),
            parent_id: None,
            sort_order,
            is_active: true,
        }
    }

    fn roles_with(id: RoleId) -> MockRoleRepository {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_id()
            .returning(move |requested| Ok((requested == id).then(|| role(id))));
        roles
    }

    fn catalog() -> MockMenuItemRepository {
        let mut menu = MockMenuItemRepository::new();
        menu.expect_list_active().returning(|| {
            Ok(vec![
                item(3, MenuKey::MonitoringLicense, 1),
                item(9, MenuKey::Administrator, 2),
            ])
        });
        menu.expect_existing_ids().returning(|ids| {
            Ok(ids.iter().copied().filter(|id| *id == 3 || *id == 9).collect())
        });
        menu
    }

    fn fallback() -> FallbackMenu {
        FallbackMenu::from_settings(&FallbackSettings {
            default: vec![FallbackEntrySettings {
                key: "dashboard".to_string(),
                label: "Dashboard".to_string(),
                path: "/dashboard".to_string(),
                icon: None,
                parent: None,
                can_view: true,
                can_create: false,
                can_update: false,
                can_delete: false,
            }],
            roles: vec![],
        })
        .unwrap()
    }

    fn service(
        roles: MockRoleRepository,
        menu: MockMenuItemRepository,
        permissions: MockPermissionRepository,
        cache: Arc<dyn MenuCache>,
    ) -> PermissionService {
        PermissionService::new(
            Arc::new(roles),
            Arc::new(menu),
            Arc::new(permissions),
            cache,
            fallback(),
        )
    }

    #[tokio::test]
    async fn test_contributor_example() {
        let mut permissions = MockPermissionRepository::new();
        permissions
            .expect_list_for_role()
            .with(eq(2))
            .returning(|_| Ok(vec![RolePermission::new(2, 3, Capabilities::read_only())]));

        let svc = service(roles_with(2), catalog(), permissions, Arc::new(NoopMenuCache));
        let menu = svc.resolve_menu(2).await.unwrap();

        assert_eq!(menu[0].key, MenuKey::MonitoringLicense);
        assert!(menu[0].is_navigable());
        assert_eq!(menu[1].key, MenuKey::Administrator);
        assert_eq!(menu[1].capabilities, Capabilities::no_access());
    }

    #[tokio::test]
    async fn test_unknown_role_not_found() {
        let svc = service(
            roles_with(2),
            MockMenuItemRepository::new(),
            MockPermissionRepository::new(),
            Arc::new(NoopMenuCache),
        );

        assert_eq!(svc.resolve_menu(5).await, Err(DomainError::RoleNotFound(5)));
        assert_eq!(
            svc.save_permissions(5, vec![]).await,
            Err(DomainError::RoleNotFound(5))
        );
    }

    #[tokio::test]
    async fn test_unavailable_store_serves_fallback() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_id()
            .returning(|_| Err(DomainError::Unavailable("pool timed out".to_string())));

        let svc = service(
            roles,
            MockMenuItemRepository::new(),
            MockPermissionRepository::new(),
            Arc::new(NoopMenuCache),
        );
        let resolved = svc.resolve_menu_or_fallback(2).await.unwrap();

        assert!(!resolved.is_dynamic);
        assert_eq!(resolved.nodes.len(), 1);
        assert_eq!(resolved.nodes[0].key, MenuKey::Dashboard);
    }

    #[tokio::test]
    async fn test_other_errors_propagate() {
        let mut roles = MockRoleRepository::new();
        roles
            .expect_find_by_id()
            .returning(|_| Err(DomainError::DatabaseError("syntax error".to_string())));

        let svc = service(
            roles,
            MockMenuItemRepository::new(),
            MockPermissionRepository::new(),
            Arc::new(NoopMenuCache),
        );

        assert!(matches!(
            svc.resolve_menu_or_fallback(2).await,
            Err(DomainError::DatabaseError(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_menu_item_rejects_batch() {
        let mut permissions = MockPermissionRepository::new();
        permissions.expect_save_batch().never();

        let svc = service(roles_with(2), catalog(), permissions, Arc::new(NoopMenuCache));
        let grants = vec![
            PermissionGrant { menu_item_id: 3, capabilities: Capabilities::full_access() },
            PermissionGrant { menu_item_id: 44, capabilities: Capabilities::read_only() },
            PermissionGrant { menu_item_id: 12, capabilities: Capabilities::read_only() },
        ];

        assert_eq!(
            svc.save_permissions(2, grants).await,
            Err(DomainError::InvalidMenuItems(vec![12, 44]))
        );
    }

    #[tokio::test]
    async fn test_save_dedupes_and_invalidates_cache() {
        let mut permissions = MockPermissionRepository::new();
        permissions
            .expect_save_batch()
            .withf(|role_id, grants| {
                *role_id == 2
                    && grants.len() == 2
                    && grants[0].menu_item_id == 3
                    && grants[0].capabilities == Capabilities::no_access()
            })
            .times(1)
            .returning(|_, grants| Ok(grants.len()));

        let mut cache = MockMenuCache::new();
        cache.expect_invalidate().with(eq(2)).times(1).returning(|_| Ok(1));

        let svc = service(roles_with(2), catalog(), permissions, Arc::new(cache));
        let grants = vec![
            PermissionGrant { menu_item_id: 3, capabilities: Capabilities::full_access() },
            PermissionGrant { menu_item_id: 9, capabilities: Capabilities::read_only() },
            PermissionGrant { menu_item_id: 3, capabilities: Capabilities::no_access() },
        ];

        assert_eq!(svc.save_permissions(2, grants).await, Ok(2));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let mut cache = MockMenuCache::new();
        cache.expect_generation().with(eq(2)).returning(|_| Ok(4));
        cache.expect_get().with(eq(2), eq(4)).returning(|_, _| {
            Ok(Some(vec![MenuNode {
                key: MenuKey::Reports,
                label: "Reports".to_string(),
                path: "/reports".to_string(),
                icon: MenuKey::Reports.default_icon(),
                capabilities: Capabilities::read_only(),
                children: vec![],
            }]))
        });

        let svc = service(
            MockRoleRepository::new(),
            MockMenuItemRepository::new(),
            MockPermissionRepository::new(),
            Arc::new(cache),
        );
        let menu = svc.resolve_menu(2).await.unwrap();

        assert_eq!(menu[0].key, MenuKey::Reports);
    }

    #[tokio::test]
    async fn test_cache_failure_is_not_fatal() {
        let mut cache = MockMenuCache::new();
        cache.expect_generation().returning(|_| Ok(0));
        cache
            .expect_get()
            .returning(|_, _| Err(DomainError::InternalError("connection refused".to_string())));
        cache
            .expect_put()
            .returning(|_, _, _| Err(DomainError::InternalError("connection refused".to_string())));

        let mut permissions = MockPermissionRepository::new();
        permissions.expect_list_for_role().returning(|_| Ok(vec![]));

        let svc = service(roles_with(2), catalog(), permissions, Arc::new(cache));
        let menu = svc.resolve_menu(2).await.unwrap();

        assert_eq!(menu.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_generation_bypasses_cache() {
        let mut cache = MockMenuCache::new();
        cache
            .expect_generation()
            .returning(|_| Err(DomainError::InternalError("connection refused".to_string())));
        cache.expect_get().never();
        cache.expect_put().never();

        let mut permissions = MockPermissionRepository::new();
        permissions
            .expect_list_for_role()
            .returning(|_| Ok(vec![RolePermission::new(2, 9, Capabilities::read_only())]));

        let svc = service(roles_with(2), catalog(), permissions, Arc::new(cache));
        let menu = svc.resolve_menu(2).await.unwrap();

        assert!(menu[1].is_navigable());
    }

    #[tokio::test]
    async fn test_resolve_caches_under_generation_read_first() {
        let mut cache = MockMenuCache::new();
        cache.expect_generation().with(eq(2)).times(1).returning(|_| Ok(6));
        cache.expect_get().with(eq(2), eq(6)).returning(|_, _| Ok(None));
        cache
            .expect_put()
            .withf(|role_id, generation, menu| *role_id == 2 && *generation == 6 && menu.len() == 2)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut permissions = MockPermissionRepository::new();
        permissions.expect_list_for_role().returning(|_| Ok(vec![]));

        let svc = service(roles_with(2), catalog(), permissions, Arc::new(cache));

        assert_eq!(svc.resolve_menu(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_save_reports_failed_invalidation() {
        let mut permissions = MockPermissionRepository::new();
        permissions
            .expect_save_batch()
            .times(1)
            .returning(|_, grants| Ok(grants.len()));

        let mut cache = MockMenuCache::new();
        cache
            .expect_invalidate()
            .with(eq(2))
            .returning(|_| Err(DomainError::InternalError("connection refused".to_string())));

        let svc = service(roles_with(2), catalog(), permissions, Arc::new(cache));
        let grants = vec![PermissionGrant { menu_item_id: 3, capabilities: Capabilities::read_only() }];

        assert!(matches!(
            svc.save_permissions(2, grants).await,
            Err(DomainError::CacheInvalidationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_role_permissions_fill_missing_rows() {
        let mut permissions = MockPermissionRepository::new();
        permissions
            .expect_list_for_role()
            .returning(|_| Ok(vec![RolePermission::new(2, 9, Capabilities::full_access())]));

        let svc = service(roles_with(2), catalog(), permissions, Arc::new(NoopMenuCache));
        let rows = svc.role_permissions(2).await.unwrap();

        assert_eq!(
            rows,
            vec![
                RolePermission::denied(2, 3),
                RolePermission::new(2, 9, Capabilities::full_access()),
            ]
        );
    }

    #[test]
    fn test_dedupe_keeps_first_position() {
        let grants = vec![
            PermissionGrant { menu_item_id: 1, capabilities: Capabilities::read_only() },
            PermissionGrant { menu_item_id: 2, capabilities: Capabilities::read_only() },
            PermissionGrant { menu_item_id: 1, capabilities: Capabilities::full_access() },
        ];

        let out = dedupe_last_wins(grants);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].menu_item_id, 1);
        assert_eq!(out[0].capabilities, Capabilities::full_access());
    }
}
