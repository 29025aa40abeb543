// ============================================================================
// Portal Infrastructure - PostgreSQL Notification Acknowledgement Repository
// File: crates/portal-infrastructure/src/database/postgres/notification_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use portal_core::domain::NotificationAck;
use portal_core::error::DomainError;
use portal_core::repositories::NotificationAckRepository;
use portal_shared::UserId;

use crate::database::error::map_sqlx_error;

pub struct PgNotificationAckRepository {
    pool: PgPool,
}

impl PgNotificationAckRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationAckRow {
    pub user_id: i32,
    pub acknowledged_at: DateTime<Utc>,
}

impl From<NotificationAckRow> for NotificationAck {
    fn from(row: NotificationAckRow) -> Self {
        NotificationAck {
            user_id: row.user_id,
            acknowledged_at: row.acknowledged_at,
        }
    }
}

#[async_trait]
impl NotificationAckRepository for PgNotificationAckRepository {
    async fn find(&self, user_id: UserId) -> Result<Option<NotificationAck>, DomainError> {
        let row: Option<NotificationAckRow> = sqlx::query_as(
            r#"
            SELECT user_id, acknowledged_at
            FROM notification_acks
            WHERE user_id = $1
            "#
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("finding notification ack", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn upsert(&self, ack: &NotificationAck) -> Result<NotificationAck, DomainError> {
        let row: NotificationAckRow = sqlx::query_as(
            r#"
            INSERT INTO notification_acks (user_id, acknowledged_at)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE
            SET acknowledged_at = GREATEST(notification_acks.acknowledged_at, EXCLUDED.acknowledged_at)
            RETURNING user_id, acknowledged_at
            "#
        )
        .bind(ack.user_id)
        .bind(ack.acknowledged_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("storing notification ack", e))?;

        Ok(row.into())
    }
}
