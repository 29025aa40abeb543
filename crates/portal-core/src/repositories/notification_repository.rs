//! Notification acknowledgement repository trait (port)

use async_trait::async_trait;
use portal_shared::UserId;
use crate::domain::NotificationAck;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationAckRepository: Send + Sync {
    async fn find(&self, user_id: UserId) -> Result<Option<NotificationAck>, DomainError>;
    async fn upsert(&self, ack: &NotificationAck) -> Result<NotificationAck, DomainError>;
}
