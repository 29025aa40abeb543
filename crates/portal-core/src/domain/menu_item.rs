// ============================================================================
// Portal Core - Menu Item Entity
// File: crates/portal-core/src/domain/menu_item.rs
// Description: Navigable catalog entry, optionally nested under a parent
// ============================================================================

use portal_shared::MenuItemId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::menu_key::{MenuIcon, MenuKey};

/// Menu catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub key: MenuKey,

    #[validate(length(min = 1, max = 100, message = "Menu label must be between 1 and 100 characters"))]
    pub label: String,

    #[validate(length(min = 1, max = 255, message = "Menu path must be between 1 and 255 characters"))]
    pub path: String,

    pub icon: MenuIcon,
    pub parent_id: Option<MenuItemId>,
    pub sort_order: i32,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_menu_item() {
        let item = MenuItem {
            id: 1,
            key: MenuKey::Dashboard,
            label: "Dashboard".to_string(),
            path: "/dashboard".to_string(),
            icon: MenuKey::Dashboard.default_icon(),
            parent_id: None,
            sort_order: 1,
            is_active: true,
        };
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_empty_path_invalid() {
        let item = MenuItem {
            id: 2,
            key: MenuKey::Reports,
            label: "Reports".to_string(),
            path: String::new(),
            icon: MenuIcon::FileText,
            parent_id: Some(1),
            sort_order: 2,
            is_active: true,
        };
        assert!(item.validate().is_err());
    }
}
