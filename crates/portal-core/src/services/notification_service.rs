// ============================================================================
// Portal Core - Notification Service
// File: crates/portal-core/src/services/notification_service.rs
// ============================================================================
//! Per-user "notifications cleared" acknowledgements

use std::sync::Arc;

use portal_shared::UserId;
use tracing::debug;

use crate::domain::NotificationAck;
use crate::error::DomainError;
use crate::repositories::NotificationAckRepository;

pub struct NotificationService {
    ack_repo: Arc<dyn NotificationAckRepository>,
}

impl NotificationService {
    pub fn new(ack_repo: Arc<dyn NotificationAckRepository>) -> Self {
        Self { ack_repo }
    }

    /// Marks every notification raised up to now as seen.
    pub async fn acknowledge(&self, user_id: UserId) -> Result<NotificationAck, DomainError> {
        let ack = self.ack_repo.upsert(&NotificationAck::now(user_id)).await?;
        debug!("Notifications acknowledged for user {} at {}", user_id, ack.acknowledged_at);
        Ok(ack)
    }

    pub async fn last_acknowledged(&self, user_id: UserId) -> Result<Option<NotificationAck>, DomainError> {
        self.ack_repo.find(user_id).await
    }
}
