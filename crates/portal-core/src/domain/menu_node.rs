// ============================================================================
// Portal Core - Menu Node
// File: crates/portal-core/src/domain/menu_node.rs
// Description: Permission-annotated menu tree consumed by the navigation renderer
// ============================================================================

use std::collections::HashMap;

use portal_shared::MenuItemId;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::menu_item::MenuItem;
use super::menu_key::{MenuIcon, MenuKey};
use super::role_permission::{Capabilities, RolePermission};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub key: MenuKey,
    pub label: String,
    pub path: String,
    pub icon: MenuIcon,
    pub capabilities: Capabilities,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Nodes without view are still rendered in the tree but must not be routed to.
    pub fn is_navigable(&self) -> bool {
        self.capabilities.can_view
    }
}

/// Left-joins `items` with `permissions` and nests children under parents.
///
/// Items without a permission row get no capabilities. Siblings keep
/// `(sort_order, id)` order. Items whose parent is not in `items` are
/// unreachable and dropped.
pub fn build_menu_forest(items: &[MenuItem], permissions: &[RolePermission]) -> Vec<MenuNode> {
    let granted: HashMap<MenuItemId, Capabilities> = permissions
        .iter()
        .map(|p| (p.menu_item_id, p.capabilities))
        .collect();

    let mut ordered: Vec<&MenuItem> = items.iter().collect();
    ordered.sort_by_key(|item| (item.sort_order, item.id));

    let mut children_of: HashMap<Option<MenuItemId>, Vec<&MenuItem>> = HashMap::new();
    for item in ordered {
        children_of.entry(item.parent_id).or_default().push(item);
    }

    let forest = build_level(None, &children_of, &granted);

    let placed = count_nodes(&forest);
    if placed < items.len() {
        warn!(
            "Dropped {} menu item(s) whose parent is missing or inactive",
            items.len() - placed
        );
    }

    forest
}

fn build_level(
    parent: Option<MenuItemId>,
    children_of: &HashMap<Option<MenuItemId>, Vec<&MenuItem>>,
    granted: &HashMap<MenuItemId, Capabilities>,
) -> Vec<MenuNode> {
    let Some(siblings) = children_of.get(&parent) else {
        return Vec::new();
    };

    siblings
        .iter()
        .map(|item| MenuNode {
            key: item.key,
            label: item.label.clone(),
            path: item.path.clone(),
            icon: item.icon,
            capabilities: granted.get(&item.id).copied().unwrap_or_default(),
            children: build_level(Some(item.id), children_of, granted),
        })
        .collect()
}

pub(crate) fn count_nodes(forest: &[MenuNode]) -> usize {
    forest.iter().map(|n| 1 + count_nodes(&n.children)).sum()
}
