// ============================================================================
// Portal Infrastructure - PostgreSQL Menu Item Repository
// File: crates/portal-infrastructure/src/database/postgres/menu_item_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use portal_core::domain::{MenuIcon, MenuItem, MenuKey};
use portal_core::error::DomainError;
use portal_core::repositories::MenuItemRepository;
use portal_shared::MenuItemId;

use crate::database::error::map_sqlx_error;

pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: i32,
    pub menu_key: String,
    pub label: String,
    pub path: String,
    pub icon: Option<String>,
    pub parent_id: Option<i32>,
    pub sort_order: i32,
    pub is_active: bool,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = DomainError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let key: MenuKey = row.menu_key.parse()?;
        Ok(MenuItem {
            id: row.id,
            key,
            label: row.label,
            path: row.path,
            icon: MenuIcon::resolve(row.icon.as_deref(), key)?,
            parent_id: row.parent_id,
            sort_order: row.sort_order,
            is_active: row.is_active,
        })
    }
}

#[async_trait]
impl MenuItemRepository for PgMenuItemRepository {
    async fn list_active(&self) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT id, menu_key, label, path, icon, parent_id, sort_order, is_active
            FROM menu_items
            WHERE is_active = TRUE
            ORDER BY sort_order, id
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("listing active menu items", e))?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn existing_ids(&self, ids: &[MenuItemId]) -> Result<Vec<MenuItemId>, DomainError> {
        sqlx::query_scalar::<_, i32>(
            r#"
            SELECT id
            FROM menu_items
            WHERE id = ANY($1)
            "#
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("checking menu item ids", e))
    }
}
