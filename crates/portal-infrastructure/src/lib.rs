//! # Portal Infrastructure
//! 
//! Database and cache implementations (adapters).

pub mod database;
pub mod cache;

pub use database::{
    create_pool, run_migrations, InMemoryStore, PgMenuItemRepository, PgNotificationAckRepository,
    PgPermissionRepository, PgRoleRepository,
};
pub use cache::RedisMenuCache;
