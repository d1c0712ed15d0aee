mod inmemory;

pub use inmemory::InMemoryNotificationRepo;
use herald_domain::{Notification, NotificationStatus, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn save(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    /// All notifications, newest scheduled first, optionally filtered on status
    async fn find_all(&self, status: Option<NotificationStatus>)
        -> anyhow::Result<Vec<Notification>>;
    async fn delete(&self, notification_id: &ID) -> Option<Notification>;
    /// Pending notifications whose scheduled time has passed
    async fn find_due_pending(&self, now: i64) -> anyhow::Result<Vec<Notification>>;
}
