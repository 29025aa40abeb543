// ============================================================================
// Portal Infrastructure - Redis Menu Cache
// File: crates/portal-infrastructure/src/cache/redis_cache.rs
// ============================================================================

use async_trait::async_trait;
use deadpool_redis::redis::AsyncCommands;
use deadpool_redis::{Config, Pool, PoolConfig, Runtime};
use tracing::debug;

use portal_core::domain::MenuNode;
use portal_core::error::DomainError;
use portal_core::repositories::MenuCache;
use portal_shared::config::RedisSettings;
use portal_shared::constants::MENU_CACHE_KEY_PREFIX;
use portal_shared::RoleId;

/// Resolved menus stored as JSON under `portal:menu:role:<id>:<generation>` with a TTL.
pub struct RedisMenuCache {
    pool: Pool,
    ttl_seconds: u64,
}

impl RedisMenuCache {
    pub fn new(settings: &RedisSettings) -> Result<Self, DomainError> {
        let mut config = Config::from_url(settings.url.clone());
        config.pool = Some(PoolConfig::new(settings.max_connections));
        let pool = config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| DomainError::InternalError(format!("redis pool: {}", e)))?;

        Ok(Self {
            pool,
            ttl_seconds: settings.ttl_seconds,
        })
    }

    async fn connection(&self) -> Result<deadpool_redis::Connection, DomainError> {
        self.pool
            .get()
            .await
            .map_err(|e| DomainError::InternalError(format!("redis connection: {}", e)))
    }
}

/// Entry key for one role at one generation.
pub(crate) fn cache_key(role_id: RoleId, generation: u64) -> String {
    format!("{}{}:{}", MENU_CACHE_KEY_PREFIX, role_id, generation)
}

/// Counter bumped with `INCR` on every invalidation. Never expires.
pub(crate) fn generation_key(role_id: RoleId) -> String {
    format!("{}{}:generation", MENU_CACHE_KEY_PREFIX, role_id)
}

fn redis_error(e: deadpool_redis::redis::RedisError) -> DomainError {
    DomainError::InternalError(format!("redis: {}", e))
}

#[async_trait]
impl MenuCache for RedisMenuCache {
    async fn generation(&self, role_id: RoleId) -> Result<u64, DomainError> {
        let mut conn = self.connection().await?;
        let generation: Option<u64> = conn.get(generation_key(role_id)).await.map_err(redis_error)?;
        Ok(generation.unwrap_or(0))
    }

    async fn get(&self, role_id: RoleId, generation: u64) -> Result<Option<Vec<MenuNode>>, DomainError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(cache_key(role_id, generation))
            .await
            .map_err(redis_error)?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| DomainError::InternalError(format!("cached menu decode: {}", e))),
            None => Ok(None),
        }
    }

    async fn put(&self, role_id: RoleId, generation: u64, menu: &[MenuNode]) -> Result<(), DomainError> {
        let json = serde_json::to_string(menu)
            .map_err(|e| DomainError::InternalError(format!("cached menu encode: {}", e)))?;

        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(cache_key(role_id, generation), json, self.ttl_seconds)
            .await
            .map_err(redis_error)?;

        debug!(
            "Cached menu for role {} at generation {} ({}s)",
            role_id, generation, self.ttl_seconds
        );
        Ok(())
    }

    async fn invalidate(&self, role_id: RoleId) -> Result<u64, DomainError> {
        let mut conn = self.connection().await?;
        let generation: u64 = conn
            .incr(generation_key(role_id), 1u64)
            .await
            .map_err(redis_error)?;

        debug!("Menu cache for role {} moved to generation {}", role_id, generation);
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_layout() {
        assert_eq!(cache_key(2, 0), "portal:menu:role:2:0");
        assert_eq!(cache_key(2, 15), "portal:menu:role:2:15");
        assert_eq!(generation_key(2), "portal:menu:role:2:generation");
    }

    #[test]
    fn test_pool_builds_without_connecting() {
        let settings = RedisSettings {
            url: "redis://127.0.0.1:6379/".to_string(),
            max_connections: 2,
            ttl_seconds: 60,
        };
        assert!(RedisMenuCache::new(&settings).is_ok());
    }
}
