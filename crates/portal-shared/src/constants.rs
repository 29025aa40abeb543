//! Application-wide constants

pub const DEFAULT_MENU_CACHE_TTL_SECONDS: u64 = 300;
pub const DB_ACQUIRE_TIMEOUT_SECONDS: u64 = 3;
pub const MIN_ROLE_NAME_LENGTH: u64 = 2;
pub const MAX_ROLE_NAME_LENGTH: u64 = 100;
pub const MENU_CACHE_KEY_PREFIX: &str = "portal:menu:role:";
pub const MENU_CACHE_INVALIDATE_ATTEMPTS: u32 = 3;
pub const LOG_FILE_PREFIX: &str = "portal-server.log";
