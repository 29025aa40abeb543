// ============================================================================
// Portal Infrastructure - PostgreSQL Role Repository
// File: crates/portal-infrastructure/src/database/postgres/role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::info;

use portal_core::domain::{NewRole, Role};
use portal_core::error::DomainError;
use portal_core::repositories::RoleRepository;
use portal_shared::RoleId;

use crate::database::error::{is_unique_violation, map_sqlx_error};

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct RoleRow {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM roles
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("finding role by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM roles
            WHERE LOWER(name) = LOWER($1)
            "#
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("finding role by name", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self) -> Result<Vec<Role>, DomainError> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, name, created_at
            FROM roles
            ORDER BY id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("listing roles", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, role: &NewRole) -> Result<Role, DomainError> {
        info!("Creating role: {}", role.name);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("starting role transaction", e))?;

        let row: RoleRow = sqlx::query_as(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#
        )
        .bind(&role.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::RoleNameAlreadyExists(role.name.clone())
            } else {
                map_sqlx_error("creating role", e)
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO role_permissions (role_id, menu_item_id)
            SELECT $1, id FROM menu_items
            ON CONFLICT (role_id, menu_item_id) DO NOTHING
            "#
        )
        .bind(row.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("seeding role permissions", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("committing role", e))?;

        info!("Role created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn delete(&self, id: RoleId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM roles
            WHERE id = $1
            "#
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("deleting role", e))?;

        Ok(result.rows_affected() > 0)
    }
}
