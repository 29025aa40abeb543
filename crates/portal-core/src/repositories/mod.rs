//! Repository traits (ports)

pub mod role_repository;
pub mod menu_item_repository;
pub mod permission_repository;
pub mod notification_repository;
pub mod menu_cache;

pub use role_repository::RoleRepository;
pub use menu_item_repository::MenuItemRepository;
pub use permission_repository::PermissionRepository;
pub use notification_repository::NotificationAckRepository;
pub use menu_cache::{invalidate_menu, MenuCache, NoopMenuCache};
