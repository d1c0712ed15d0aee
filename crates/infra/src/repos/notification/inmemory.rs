use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use herald_domain::{Notification, NotificationStatus, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn save(&self, notification: &Notification) -> anyhow::Result<()> {
        save(notification, &self.notifications);
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_all(
        &self,
        status: Option<NotificationStatus>,
    ) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n| match status {
            Some(status) => n.status == status,
            None => true,
        });
        notifications.sort_by_key(|n| std::cmp::Reverse(n.scheduled_time));
        Ok(notifications)
    }

    async fn delete(&self, notification_id: &ID) -> Option<Notification> {
        delete(notification_id, &self.notifications)
    }

    async fn find_due_pending(&self, now: i64) -> anyhow::Result<Vec<Notification>> {
        Ok(find_by(&self.notifications, |n| {
            n.status == NotificationStatus::Pending && n.scheduled_time <= now
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_domain::TargetAudience;

    fn notification(scheduled_time: i64) -> Notification {
        Notification::new(
            "Hello".into(),
            scheduled_time,
            TargetAudience::All,
            Vec::new(),
            0,
        )
    }

    #[tokio::test]
    async fn finds_due_pending_only() {
        let repo = InMemoryNotificationRepo::new();
        let due = notification(100);
        let future = notification(10_000);
        let mut already_sent = notification(50);
        already_sent.mark_sent(60);

        repo.insert(&due).await.unwrap();
        repo.insert(&future).await.unwrap();
        repo.insert(&already_sent).await.unwrap();

        let found = repo.find_due_pending(500).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, due.id);
    }

    #[tokio::test]
    async fn lists_newest_scheduled_first() {
        let repo = InMemoryNotificationRepo::new();
        let older = notification(100);
        let newer = notification(200);
        repo.insert(&older).await.unwrap();
        repo.insert(&newer).await.unwrap();

        let all = repo.find_all(None).await.unwrap();
        assert_eq!(all[0].id, newer.id);
        assert_eq!(all[1].id, older.id);
    }
}
