// ============================================================================
// Portal Core - Notification Acknowledgement
// File: crates/portal-core/src/domain/notification_ack.rs
// Description: Server-tracked "notifications cleared" marker per user
// ============================================================================

use chrono::Utc;
use portal_shared::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAck {
    pub user_id: UserId,
    pub acknowledged_at: Timestamp,
}

impl NotificationAck {
    pub fn now(user_id: UserId) -> Self {
        Self {
            user_id,
            acknowledged_at: Utc::now(),
        }
    }
}
