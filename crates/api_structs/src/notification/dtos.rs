use herald_domain::{Notification, NotificationStatus, TargetAudience, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub message: String,
    pub scheduled_time: i64,
    pub target_audience: TargetAudience,
    pub target_ids: Vec<ID>,
    pub status: NotificationStatus,
    pub sent_at: Option<i64>,
    pub created: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id.clone(),
            message: notification.message,
            scheduled_time: notification.scheduled_time,
            target_audience: notification.target_audience,
            target_ids: notification.target_ids,
            status: notification.status,
            sent_at: notification.sent_at,
            created: notification.created,
        }
    }
}
