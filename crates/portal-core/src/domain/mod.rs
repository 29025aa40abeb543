//! # Portal Core - Domain Module
//! 
//! Domain entities for the portal permission model.

pub mod role;
pub mod menu_key;
pub mod menu_item;
pub mod role_permission;
pub mod menu_node;
pub mod fallback;
pub mod notification_ack;

// Re-export all entities and enums
pub use role::{Role, NewRole};
pub use menu_key::{MenuKey, MenuIcon};
pub use menu_item::MenuItem;
pub use role_permission::{Action, Capabilities, PermissionGrant, RolePermission};
pub use menu_node::{build_menu_forest, MenuNode};
pub use fallback::FallbackMenu;
pub use notification_ack::NotificationAck;
