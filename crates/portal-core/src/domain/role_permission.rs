// ============================================================================
// Portal Core - Role Permission Entity (Permission Matrix)
// File: crates/portal-core/src/domain/role_permission.rs
// Description: Capability flags linking roles to menu items
// ============================================================================

use portal_shared::{MenuItemId, RoleId};
use serde::{Deserialize, Serialize};

/// Action a caller wants to perform on a menu area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

/// Menu capability flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Capabilities {
    #[serde(default)]
    pub can_view: bool,
    #[serde(default)]
    pub can_create: bool,
    #[serde(default)]
    pub can_update: bool,
    #[serde(default)]
    pub can_delete: bool,
}

impl Capabilities {
    pub fn full_access() -> Self {
        Self {
            can_view: true,
            can_create: true,
            can_update: true,
            can_delete: true,
        }
    }

    pub fn read_only() -> Self {
        Self {
            can_view: true,
            ..Self::default()
        }
    }

    pub fn no_access() -> Self {
        Self::default()
    }

    pub fn has_any(&self) -> bool {
        self.can_view || self.can_create || self.can_update || self.can_delete
    }

    /// Server-side check. Nothing is allowed on an area the role cannot view.
    pub fn allows(&self, action: Action) -> bool {
        if !self.can_view {
            return false;
        }
        match action {
            Action::View => true,
            Action::Create => self.can_create,
            Action::Update => self.can_update,
            Action::Delete => self.can_delete,
        }
    }
}

/// Role Permission row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    pub role_id: RoleId,
    pub menu_item_id: MenuItemId,
    #[serde(flatten)]
    pub capabilities: Capabilities,
}

impl RolePermission {
    pub fn new(role_id: RoleId, menu_item_id: MenuItemId, capabilities: Capabilities) -> Self {
        Self {
            role_id,
            menu_item_id,
            capabilities,
        }
    }

    /// Fail-closed default for a pair without a stored row.
    pub fn denied(role_id: RoleId, menu_item_id: MenuItemId) -> Self {
        Self::new(role_id, menu_item_id, Capabilities::no_access())
    }
}

/// One entry of an admin save request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub menu_item_id: MenuItemId,
    #[serde(flatten)]
    pub capabilities: Capabilities,
}
