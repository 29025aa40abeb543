// ============================================================================
// Portal Infrastructure - In-Memory Store
// File: crates/portal-infrastructure/src/database/memory.rs
// Description: Process-local store implementing every repository port
// ============================================================================
//! Used for local UI development (`database.url = "memory://"`) and for
//! exercising the HTTP layer without PostgreSQL. Can be switched offline to
//! simulate an unreachable permission store.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use portal_core::domain::{
    Capabilities, MenuItem, MenuKey, NewRole, NotificationAck, PermissionGrant, Role, RolePermission,
};
use portal_core::error::DomainError;
use portal_core::repositories::{
    MenuItemRepository, NotificationAckRepository, PermissionRepository, RoleRepository,
};
use portal_shared::{MenuItemId, RoleId, UserId};

pub const MEMORY_URL_SCHEME: &str = "memory://";

#[derive(Debug, Default)]
struct MemoryState {
    roles: BTreeMap<RoleId, Role>,
    menu_items: Vec<MenuItem>,
    permissions: HashMap<(RoleId, MenuItemId), Capabilities>,
    acks: HashMap<UserId, NotificationAck>,
    next_role_id: RoleId,
}

#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
    online: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                next_role_id: 1,
                ..MemoryState::default()
            }),
            online: AtomicBool::new(true),
        }
    }

    /// Store holding the same roles and catalog as the seed migration.
    /// Only Administrator holds grants; the other roles start fully denied.
    pub async fn with_default_catalog() -> Self {
        let store = Self::new();
        for name in ["Administrator", "Contributor", "Viewer"] {
            let seeded = match NewRole::new(name) {
                Ok(role) => store.create(&role).await.map(|_| ()),
                Err(e) => Err(DomainError::from(e)),
            };
            if let Err(e) = seeded {
                warn!("Failed to seed role {}: {}", name, e);
            }
        }

        let catalog: [(MenuItemId, MenuKey, &str, &str, Option<MenuItemId>, i32); 13] = [
            (1, MenuKey::Dashboard, "Dashboard", "/dashboard", None, 1),
            (2, MenuKey::ProductLifecycle, "Product Lifecycle", "/lifecycle", None, 2),
            (3, MenuKey::LifecycleStage, "Lifecycle Stages", "/lifecycle/stages", Some(2), 1),
            (4, MenuKey::TransitionSpeed, "Transition Speed", "/lifecycle/transition-speed", Some(2), 2),
            (5, MenuKey::MonitoringLicense, "License Monitoring", "/monitoring/license", None, 3),
            (6, MenuKey::ChangeRequest, "Change Requests", "/requests/change", None, 4),
            (7, MenuKey::JobRequest, "Job Requests", "/requests/job", None, 5),
            (8, MenuKey::Reports, "Reports", "/reports", None, 6),
            (9, MenuKey::Notifications, "Notifications", "/notifications", None, 7),
            (10, MenuKey::Administrator, "Administrator", "/admin", None, 8),
            (11, MenuKey::RoleManagement, "Roles", "/admin/roles", Some(10), 1),
            (12, MenuKey::MenuPermission, "Menu Permissions", "/admin/permissions", Some(10), 2),
            (13, MenuKey::UserManagement, "Users", "/admin/users", Some(10), 3),
        ];
        for (id, key, label, path, parent_id, sort_order) in catalog {
            store
                .insert_menu_item(MenuItem {
                    id,
                    key,
                    label: label.to_string(),
                    path: path.to_string(),
                    icon: key.default_icon(),
                    parent_id,
                    sort_order,
                    is_active: true,
                })
                .await;
        }

        {
            let mut state = store.state.write().await;
            for ((role_id, _), caps) in state.permissions.iter_mut() {
                if *role_id == 1 {
                    *caps = Capabilities::full_access();
                }
            }
        }

        info!("In-memory store seeded with default catalog");
        store
    }

    /// Adds a catalog entry; every existing role starts denied on it.
    pub async fn insert_menu_item(&self, item: MenuItem) {
        let mut state = self.state.write().await;
        let role_ids: Vec<RoleId> = state.roles.keys().copied().collect();
        for role_id in role_ids {
            state
                .permissions
                .entry((role_id, item.id))
                .or_insert_with(Capabilities::no_access);
        }
        state.menu_items.retain(|existing| existing.id != item.id);
        state.menu_items.push(item);
    }

    /// Simulates the store going down (`false`) or coming back (`true`).
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), DomainError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::Unavailable("in-memory store offline".to_string()))
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DomainError> {
        self.check_online()?;
        Ok(self.state.read().await.roles.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        self.check_online()?;
        let state = self.state.read().await;
        Ok(state
            .roles
            .values()
            .find(|r| r.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Role>, DomainError> {
        self.check_online()?;
        Ok(self.state.read().await.roles.values().cloned().collect())
    }

    async fn create(&self, role: &NewRole) -> Result<Role, DomainError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        if state.roles.values().any(|r| r.name.eq_ignore_ascii_case(&role.name)) {
            return Err(DomainError::RoleNameAlreadyExists(role.name.clone()));
        }

        let created = Role {
            id: state.next_role_id,
            name: role.name.clone(),
            created_at: Utc::now(),
        };
        state.next_role_id += 1;

        let item_ids: Vec<MenuItemId> = state.menu_items.iter().map(|i| i.id).collect();
        for item_id in item_ids {
            state
                .permissions
                .insert((created.id, item_id), Capabilities::no_access());
        }
        state.roles.insert(created.id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: RoleId) -> Result<bool, DomainError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        if state.roles.remove(&id).is_none() {
            return Ok(false);
        }
        state.permissions.retain(|(role_id, _), _| *role_id != id);
        Ok(true)
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryStore {
    async fn list_active(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.check_online()?;
        let state = self.state.read().await;
        let mut items: Vec<MenuItem> = state
            .menu_items
            .iter()
            .filter(|i| i.is_active)
            .cloned()
            .collect();
        items.sort_by_key(|i| (i.sort_order, i.id));
        Ok(items)
    }

    async fn existing_ids(&self, ids: &[MenuItemId]) -> Result<Vec<MenuItemId>, DomainError> {
        self.check_online()?;
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.menu_items.iter().any(|i| i.id == *id))
            .collect())
    }
}

#[async_trait]
impl PermissionRepository for InMemoryStore {
    async fn list_for_role(&self, role_id: RoleId) -> Result<Vec<RolePermission>, DomainError> {
        self.check_online()?;
        let state = self.state.read().await;
        let mut rows: Vec<RolePermission> = state
            .permissions
            .iter()
            .filter(|((r, _), _)| *r == role_id)
            .map(|((r, m), caps)| RolePermission::new(*r, *m, *caps))
            .collect();
        rows.sort_by_key(|p| p.menu_item_id);
        Ok(rows)
    }

    async fn save_batch(&self, role_id: RoleId, grants: &[PermissionGrant]) -> Result<usize, DomainError> {
        self.check_online()?;
        let mut state = self.state.write().await;

        // Validate the whole batch before touching anything.
        if !state.roles.contains_key(&role_id) {
            return Err(DomainError::RoleNotFound(role_id));
        }
        let missing: Vec<MenuItemId> = grants
            .iter()
            .map(|g| g.menu_item_id)
            .filter(|id| !state.menu_items.iter().any(|i| i.id == *id))
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::InvalidMenuItems(missing));
        }

        for grant in grants {
            state
                .permissions
                .insert((role_id, grant.menu_item_id), grant.capabilities);
        }
        Ok(grants.len())
    }
}

#[async_trait]
impl NotificationAckRepository for InMemoryStore {
    async fn find(&self, user_id: UserId) -> Result<Option<NotificationAck>, DomainError> {
        self.check_online()?;
        Ok(self.state.read().await.acks.get(&user_id).cloned())
    }

    async fn upsert(&self, ack: &NotificationAck) -> Result<NotificationAck, DomainError> {
        self.check_online()?;
        let mut state = self.state.write().await;
        let stored = state
            .acks
            .entry(ack.user_id)
            .and_modify(|existing| {
                if ack.acknowledged_at > existing.acknowledged_at {
                    existing.acknowledged_at = ack.acknowledged_at;
                }
            })
            .or_insert_with(|| ack.clone());
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_catalog_seeded() {
        let store = InMemoryStore::with_default_catalog().await;

        let roles = RoleRepository::list(&store).await.unwrap();
        assert_eq!(roles.len(), 3);
        assert_eq!(roles[1].name, "Contributor");

        let items = store.list_active().await.unwrap();
        assert_eq!(items.len(), 13);
        assert_eq!(items[0].key, MenuKey::Dashboard);

        let admin = store.list_for_role(1).await.unwrap();
        assert!(admin.iter().all(|p| p.capabilities == Capabilities::full_access()));
        let contributor = store.list_for_role(2).await.unwrap();
        assert_eq!(contributor.len(), 13);
        assert!(contributor.iter().all(|p| !p.capabilities.has_any()));
    }

    #[tokio::test]
    async fn test_offline_store_unavailable() {
        let store = InMemoryStore::new();
        store.set_online(false);

        assert!(matches!(
            RoleRepository::find_by_id(&store, 1).await,
            Err(DomainError::Unavailable(_))
        ));

        store.set_online(true);
        assert_eq!(RoleRepository::find_by_id(&store, 1).await, Ok(None));
    }

    #[tokio::test]
    async fn test_delete_role_cascades() {
        let store = InMemoryStore::with_default_catalog().await;

        assert!(RoleRepository::delete(&store, 2).await.unwrap());
        assert!(store.list_for_role(2).await.unwrap().is_empty());
        assert!(!RoleRepository::delete(&store, 2).await.unwrap());
    }

    #[tokio::test]
    async fn test_ack_never_moves_backwards() {
        let store = InMemoryStore::new();
        let later = NotificationAck::now(4);
        let earlier = NotificationAck {
            user_id: 4,
            acknowledged_at: later.acknowledged_at - chrono::Duration::hours(1),
        };

        store.upsert(&later).await.unwrap();
        let stored = store.upsert(&earlier).await.unwrap();

        assert_eq!(stored.acknowledged_at, later.acknowledged_at);
    }
}
