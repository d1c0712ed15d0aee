use crate::recipient::Category;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Audience selector for a `Notification`. A closed set of variants so that
/// every call site knows exactly which fields accompany which selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetAudience {
    All,
    Winners,
    /// Requires `Notification::target_ids` to be non-empty
    Specific,
    Category {
        tag: Category,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

impl NotificationStatus {
    /// Status is monotonic: `Pending` may move to `Sent` or `Failed`, and a
    /// terminal status never changes again.
    pub fn can_transition(&self, to: NotificationStatus) -> bool {
        match self {
            Self::Pending => true,
            Self::Sent | Self::Failed => *self == to,
        }
    }
}

impl FromStr for NotificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid notification status: {}", s)),
        }
    }
}

/// A unit of outbound communication to an audience of recipients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: ID,
    pub message: String,
    /// Timestamp in millis at which this notification becomes due
    pub scheduled_time: i64,
    pub target_audience: TargetAudience,
    /// Recipient ids, non-empty iff `target_audience` is `Specific`
    pub target_ids: Vec<ID>,
    pub status: NotificationStatus,
    /// Set exactly once, on the transition to `Sent`
    pub sent_at: Option<i64>,
    pub created: i64,
}

impl Notification {
    pub fn new(
        message: String,
        scheduled_time: i64,
        target_audience: TargetAudience,
        target_ids: Vec<ID>,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            message,
            scheduled_time,
            target_audience,
            target_ids,
            status: NotificationStatus::Pending,
            sent_at: None,
            created: now,
        }
    }

    pub fn set_status(&mut self, status: NotificationStatus) -> bool {
        if !self.status.can_transition(status) {
            return false;
        }
        self.status = status;
        true
    }

    pub fn mark_sent(&mut self, now: i64) -> bool {
        if !self.set_status(NotificationStatus::Sent) {
            return false;
        }
        self.sent_at = Some(now);
        true
    }

    pub fn mark_failed(&mut self) -> bool {
        self.set_status(NotificationStatus::Failed)
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_notification() -> Notification {
        Notification::new(
            "A message".into(),
            100,
            TargetAudience::All,
            Vec::new(),
            100,
        )
    }

    #[test]
    fn pending_moves_to_sent_with_sent_at() {
        let mut notification = pending_notification();
        assert!(notification.mark_sent(500));
        assert_eq!(notification.status, NotificationStatus::Sent);
        assert_eq!(notification.sent_at, Some(500));
    }

    #[test]
    fn status_never_reverts() {
        let mut notification = pending_notification();
        assert!(notification.mark_sent(500));
        assert!(!notification.mark_failed());
        assert!(!notification.set_status(NotificationStatus::Pending));
        assert_eq!(notification.status, NotificationStatus::Sent);

        let mut notification = pending_notification();
        assert!(notification.mark_failed());
        assert!(!notification.mark_sent(600));
        assert_eq!(notification.sent_at, None);
    }

    #[test]
    fn terminal_status_is_idempotent() {
        let mut notification = pending_notification();
        assert!(notification.mark_failed());
        assert!(notification.set_status(NotificationStatus::Failed));
    }

    #[test]
    fn audience_serde_is_tagged() {
        let audience = TargetAudience::Category {
            tag: Category::Video,
        };
        let json = serde_json::to_string(&audience).unwrap();
        assert_eq!(json, r#"{"type":"category","tag":"video"}"#);

        let parsed: TargetAudience = serde_json::from_str(r#"{"type":"all"}"#).unwrap();
        assert_eq!(parsed, TargetAudience::All);
    }
}
