//! Resolved menu cache trait (port)

use async_trait::async_trait;
use portal_shared::constants::MENU_CACHE_INVALIDATE_ATTEMPTS;
use portal_shared::RoleId;
use tracing::warn;
use crate::domain::MenuNode;
use crate::error::DomainError;

/// Cache of resolved menus keyed by role and generation. The permission store
/// stays authoritative.
///
/// Entries are only reachable under the role's current generation, so a menu
/// built from a read that started before an invalidation can never be served
/// after it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCache: Send + Sync {
    /// Current generation for the role. Read before touching the store.
    async fn generation(&self, role_id: RoleId) -> Result<u64, DomainError>;
    async fn get(&self, role_id: RoleId, generation: u64) -> Result<Option<Vec<MenuNode>>, DomainError>;
    async fn put(&self, role_id: RoleId, generation: u64, menu: &[MenuNode]) -> Result<(), DomainError>;
    /// Advances the role's generation, orphaning every entry cached so far.
    async fn invalidate(&self, role_id: RoleId) -> Result<u64, DomainError>;
}

/// Advances the role's generation, retrying a bounded number of times.
///
/// Failure means stale menus may still be served, so it is reported.
pub async fn invalidate_menu(cache: &dyn MenuCache, role_id: RoleId) -> Result<u64, DomainError> {
    let mut last_error = None;
    for attempt in 1..=MENU_CACHE_INVALIDATE_ATTEMPTS {
        match cache.invalidate(role_id).await {
            Ok(generation) => return Ok(generation),
            Err(e) => {
                warn!(
                    "Menu cache invalidation attempt {}/{} failed for role {}: {}",
                    attempt, MENU_CACHE_INVALIDATE_ATTEMPTS, role_id, e
                );
                last_error = Some(e);
            }
        }
    }

    Err(DomainError::CacheInvalidationFailed(format!(
        "role {}: {}",
        role_id,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    )))
}

/// Used when no cache backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMenuCache;

#[async_trait]
impl MenuCache for NoopMenuCache {
    async fn generation(&self, _role_id: RoleId) -> Result<u64, DomainError> {
        Ok(0)
    }

    async fn get(&self, _role_id: RoleId, _generation: u64) -> Result<Option<Vec<MenuNode>>, DomainError> {
        Ok(None)
    }

    async fn put(&self, _role_id: RoleId, _generation: u64, _menu: &[MenuNode]) -> Result<(), DomainError> {
        Ok(())
    }

    async fn invalidate(&self, _role_id: RoleId) -> Result<u64, DomainError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_invalidate_retries_transient_failure() {
        let mut cache = MockMenuCache::new();
        let mut calls = 0;
        cache.expect_invalidate().with(eq(2)).times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(DomainError::InternalError("connection reset".to_string()))
            } else {
                Ok(7)
            }
        });

        assert_eq!(invalidate_menu(&cache, 2).await, Ok(7));
    }

    #[tokio::test]
    async fn test_invalidate_reports_persistent_failure() {
        let mut cache = MockMenuCache::new();
        cache
            .expect_invalidate()
            .times(MENU_CACHE_INVALIDATE_ATTEMPTS as usize)
            .returning(|_| Err(DomainError::InternalError("connection refused".to_string())));

        assert!(matches!(
            invalidate_menu(&cache, 2).await,
            Err(DomainError::CacheInvalidationFailed(_))
        ));
    }
}
