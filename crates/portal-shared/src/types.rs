//! Common types

use chrono::{DateTime, Utc};

pub type RoleId = i32;
pub type MenuItemId = i32;
pub type UserId = i32;
pub type Timestamp = DateTime<Utc>;
