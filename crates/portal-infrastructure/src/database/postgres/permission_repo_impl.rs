// ============================================================================
// Portal Infrastructure - PostgreSQL Role Permission Repository
// File: crates/portal-infrastructure/src/database/postgres/permission_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use portal_core::domain::{Capabilities, PermissionGrant, RolePermission};
use portal_core::error::DomainError;
use portal_core::repositories::PermissionRepository;
use portal_shared::RoleId;

use crate::database::error::map_sqlx_error;

pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RolePermissionRow {
    pub role_id: i32,
    pub menu_item_id: i32,
    pub can_view: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl From<RolePermissionRow> for RolePermission {
    fn from(row: RolePermissionRow) -> Self {
        RolePermission::new(
            row.role_id,
            row.menu_item_id,
            Capabilities {
                can_view: row.can_view,
                can_create: row.can_create,
                can_update: row.can_update,
                can_delete: row.can_delete,
            },
        )
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn list_for_role(&self, role_id: RoleId) -> Result<Vec<RolePermission>, DomainError> {
        let rows: Vec<RolePermissionRow> = sqlx::query_as(
            r#"
            SELECT role_id, menu_item_id, can_view, can_create, can_update, can_delete
            FROM role_permissions
            WHERE role_id = $1
            ORDER BY menu_item_id
            "#
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("listing role permissions", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save_batch(&self, role_id: RoleId, grants: &[PermissionGrant]) -> Result<usize, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("starting permission transaction", e))?;

        for grant in grants {
            sqlx::query(
                r#"
                INSERT INTO role_permissions (
                    role_id, menu_item_id, can_view, can_create, can_update, can_delete, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, NOW())
                ON CONFLICT (role_id, menu_item_id) DO UPDATE
                SET can_view = EXCLUDED.can_view,
                    can_create = EXCLUDED.can_create,
                    can_update = EXCLUDED.can_update,
                    can_delete = EXCLUDED.can_delete,
                    updated_at = EXCLUDED.updated_at
                "#
            )
            .bind(role_id)
            .bind(grant.menu_item_id)
            .bind(grant.capabilities.can_view)
            .bind(grant.capabilities.can_create)
            .bind(grant.capabilities.can_update)
            .bind(grant.capabilities.can_delete)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("upserting role permission", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("committing role permissions", e))?;

        debug!("Upserted {} permission row(s) for role {}", grants.len(), role_id);
        Ok(grants.len())
    }
}
