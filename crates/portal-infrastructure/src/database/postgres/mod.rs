//! PostgreSQL repository implementations

pub mod role_repo_impl;
pub mod menu_item_repo_impl;
pub mod permission_repo_impl;
pub mod notification_repo_impl;

pub use role_repo_impl::PgRoleRepository;
pub use menu_item_repo_impl::PgMenuItemRepository;
pub use permission_repo_impl::PgPermissionRepository;
pub use notification_repo_impl::PgNotificationAckRepository;
