//! Domain services (business logic)

pub mod permission_service;
pub mod role_service;
pub mod notification_service;

pub use permission_service::{PermissionService, ResolvedMenu};
pub use role_service::RoleService;
pub use notification_service::NotificationService;
