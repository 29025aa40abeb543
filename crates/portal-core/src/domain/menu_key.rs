// ============================================================================
// Portal Core - Menu Key Catalog
// File: crates/portal-core/src/domain/menu_key.rs
// Description: Closed set of menu keys and the icons they render with
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Every navigable area of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuKey {
    Dashboard,
    ProductLifecycle,
    LifecycleStage,
    TransitionSpeed,
    MonitoringLicense,
    ChangeRequest,
    JobRequest,
    Reports,
    Administrator,
    RoleManagement,
    MenuPermission,
    UserManagement,
    Notifications,
}

impl MenuKey {
    pub const ALL: [MenuKey; 13] = [
        MenuKey::Dashboard,
        MenuKey::ProductLifecycle,
        MenuKey::LifecycleStage,
        MenuKey::TransitionSpeed,
        MenuKey::MonitoringLicense,
        MenuKey::ChangeRequest,
        MenuKey::JobRequest,
        MenuKey::Reports,
        MenuKey::Administrator,
        MenuKey::RoleManagement,
        MenuKey::MenuPermission,
        MenuKey::UserManagement,
        MenuKey::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuKey::Dashboard => "dashboard",
            MenuKey::ProductLifecycle => "product_lifecycle",
            MenuKey::LifecycleStage => "lifecycle_stage",
            MenuKey::TransitionSpeed => "transition_speed",
            MenuKey::MonitoringLicense => "monitoring_license",
            MenuKey::ChangeRequest => "change_request",
            MenuKey::JobRequest => "job_request",
            MenuKey::Reports => "reports",
            MenuKey::Administrator => "administrator",
            MenuKey::RoleManagement => "role_management",
            MenuKey::MenuPermission => "menu_permission",
            MenuKey::UserManagement => "user_management",
            MenuKey::Notifications => "notifications",
        }
    }

    /// Icon used when the catalog row does not override it.
    pub fn default_icon(&self) -> MenuIcon {
        match self {
            MenuKey::Dashboard => MenuIcon::Home,
            MenuKey::ProductLifecycle => MenuIcon::Layers,
            MenuKey::LifecycleStage => MenuIcon::GitBranch,
            MenuKey::TransitionSpeed => MenuIcon::Gauge,
            MenuKey::MonitoringLicense => MenuIcon::ShieldCheck,
            MenuKey::ChangeRequest => MenuIcon::FilePen,
            MenuKey::JobRequest => MenuIcon::Briefcase,
            MenuKey::Reports => MenuIcon::FileText,
            MenuKey::Administrator => MenuIcon::Settings,
            MenuKey::RoleManagement => MenuIcon::Users,
            MenuKey::MenuPermission => MenuIcon::Lock,
            MenuKey::UserManagement => MenuIcon::UserCog,
            MenuKey::Notifications => MenuIcon::Bell,
        }
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCatalog(format!("unknown menu key '{}'", s)))
    }
}

/// Icons the navigation renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuIcon {
    Home,
    Layers,
    GitBranch,
    Gauge,
    ShieldCheck,
    FilePen,
    Briefcase,
    FileText,
    Settings,
    Users,
    Lock,
    UserCog,
    Bell,
}

impl MenuIcon {
    pub const ALL: [MenuIcon; 13] = [
        MenuIcon::Home,
        MenuIcon::Layers,
        MenuIcon::GitBranch,
        MenuIcon::Gauge,
        MenuIcon::ShieldCheck,
        MenuIcon::FilePen,
        MenuIcon::Briefcase,
        MenuIcon::FileText,
        MenuIcon::Settings,
        MenuIcon::Users,
        MenuIcon::Lock,
        MenuIcon::UserCog,
        MenuIcon::Bell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuIcon::Home => "home",
            MenuIcon::Layers => "layers",
            MenuIcon::GitBranch => "git-branch",
            MenuIcon::Gauge => "gauge",
            MenuIcon::ShieldCheck => "shield-check",
            MenuIcon::FilePen => "file-pen",
            MenuIcon::Briefcase => "briefcase",
            MenuIcon::FileText => "file-text",
            MenuIcon::Settings => "settings",
            MenuIcon::Users => "users",
            MenuIcon::Lock => "lock",
            MenuIcon::UserCog => "user-cog",
            MenuIcon::Bell => "bell",
        }
    }

    /// Resolves a stored icon column, falling back to the key's default when empty.
    pub fn resolve(stored: Option<&str>, key: MenuKey) -> Result<Self, DomainError> {
        match stored.map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => name.parse(),
            None => Ok(key.default_icon()),
        }
    }
}

impl fmt::Display for MenuIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuIcon {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuIcon::ALL
            .iter()
            .copied()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCatalog(format!("unknown menu icon '{}'", s)))
    }
}
