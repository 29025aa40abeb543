// ============================================================================
// Portal Core - Static Fallback Menu
// File: crates/portal-core/src/domain/fallback.rs
// Description: Configured menu served while the permission store is unreachable
// ============================================================================

use std::collections::HashMap;

use portal_shared::config::{FallbackEntrySettings, FallbackSettings};
use portal_shared::RoleId;

use super::menu_item::MenuItem;
use super::menu_key::{MenuIcon, MenuKey};
use super::menu_node::{build_menu_forest, count_nodes, MenuNode};
use super::role_permission::{Capabilities, RolePermission};
use crate::error::DomainError;

/// Degraded-mode menu tables, validated once at startup.
#[derive(Debug, Clone, Default)]
pub struct FallbackMenu {
    default: Vec<MenuNode>,
    by_role: HashMap<RoleId, Vec<MenuNode>>,
}

impl FallbackMenu {
    pub fn from_settings(settings: &FallbackSettings) -> Result<Self, DomainError> {
        let default = build_table(&settings.default)?;

        let mut by_role = HashMap::new();
        for role in &settings.roles {
            if by_role.insert(role.role_id, build_table(&role.entries)?).is_some() {
                return Err(DomainError::InvalidCatalog(format!(
                    "fallback menu for role {} defined twice",
                    role.role_id
                )));
            }
        }

        Ok(Self { default, by_role })
    }

    /// Role-specific table, or the default one.
    pub fn for_role(&self, role_id: RoleId) -> Vec<MenuNode> {
        self.by_role
            .get(&role_id)
            .unwrap_or(&self.default)
            .clone()
    }
}

fn build_table(entries: &[FallbackEntrySettings]) -> Result<Vec<MenuNode>, DomainError> {
    let mut keys = Vec::with_capacity(entries.len());
    for entry in entries {
        let key: MenuKey = entry.key.parse()?;
        if keys.contains(&key) {
            return Err(DomainError::InvalidCatalog(format!(
                "fallback menu key '{}' listed twice",
                key
            )));
        }
        keys.push(key);
    }

    // Position in the table doubles as id and sort order.
    let id_of = |key: MenuKey| keys.iter().position(|k| *k == key).map(|i| i as i32 + 1);

    let mut items = Vec::with_capacity(entries.len());
    let mut permissions = Vec::with_capacity(entries.len());
    for (entry, key) in entries.iter().zip(keys.iter().copied()) {
        let parent_id = match entry.parent.as_deref() {
            Some(parent) => {
                let parent_key: MenuKey = parent.parse()?;
                Some(id_of(parent_key).ok_or_else(|| {
                    DomainError::InvalidCatalog(format!(
                        "fallback menu entry '{}' references missing parent '{}'",
                        key, parent_key
                    ))
                })?)
            }
            None => None,
        };
        let id = id_of(key).unwrap_or_default();

        items.push(MenuItem {
            id,
            key,
            label: entry.label.clone(),
            path: entry.path.clone(),
            icon: MenuIcon::resolve(entry.icon.as_deref(), key)?,
            parent_id,
            sort_order: id,
            is_active: true,
        });
        permissions.push(RolePermission::new(
            0,
            id,
            Capabilities {
                can_view: entry.can_view,
                can_create: entry.can_create,
                can_update: entry.can_update,
                can_delete: entry.can_delete,
            },
        ));
    }

    let table = build_menu_forest(&items, &permissions);
    if count_nodes(&table) != entries.len() {
        return Err(DomainError::InvalidCatalog(
            "fallback menu parents form a cycle".to_string(),
        ));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_shared::config::RoleFallbackSettings;

    fn entry(key: &str, parent: Option<&str>, can_view: bool) -> FallbackEntrySettings {
        FallbackEntrySettings {
            key: key.to_string(),
            label: key.to_string(),
            path: format!("/{}", key),
            icon: None,
            parent: parent.map(str::to_string),
            can_view,
            can_create: false,
            can_update: false,
            can_delete: false,
        }
    }

    #[test]
    fn test_role_table_overrides_default() {
        let settings = FallbackSettings {
            default: vec![entry("dashboard", None, true)],
            roles: vec![RoleFallbackSettings {
                role_id: 1,
                entries: vec![
                    entry("dashboard", None, true),
                    entry("administrator", None, true),
                    entry("role_management", Some("administrator"), true),
                ],
            }],
        };

        let menu = FallbackMenu::from_settings(&settings).unwrap();

        let admin = menu.for_role(1);
        assert_eq!(admin.len(), 2);
        assert_eq!(admin[1].children[0].key, MenuKey::RoleManagement);

        let other = menu.for_role(42);
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].key, MenuKey::Dashboard);
        assert!(other[0].is_navigable());
    }

    #[test]
    fn test_unknown_key_fails_startup() {
        let settings = FallbackSettings {
            default: vec![entry("wiki", None, true)],
            roles: vec![],
        };
        assert!(matches!(
            FallbackMenu::from_settings(&settings),
            Err(DomainError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_missing_parent_rejected() {
        let settings = FallbackSettings {
            default: vec![entry("role_management", Some("administrator"), true)],
            roles: vec![],
        };
        assert!(FallbackMenu::from_settings(&settings).is_err());
    }

    #[test]
    fn test_parent_cycles_rejected() {
        let self_parent = FallbackSettings {
            default: vec![entry("reports", Some("reports"), true)],
            roles: vec![],
        };
        assert!(matches!(
            FallbackMenu::from_settings(&self_parent),
            Err(DomainError::InvalidCatalog(_))
        ));

        let mutual = FallbackSettings {
            default: vec![
                entry("dashboard", None, true),
                entry("change_request", Some("job_request"), true),
                entry("job_request", Some("change_request"), true),
            ],
            roles: vec![],
        };
        assert!(matches!(
            FallbackMenu::from_settings(&mutual),
            Err(DomainError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_empty_settings_yield_empty_menu() {
        let menu = FallbackMenu::from_settings(&FallbackSettings::default()).unwrap();
        assert!(menu.for_role(3).is_empty());
    }
}
