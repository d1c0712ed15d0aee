use crate::dtos::NotificationDTO;
use herald_domain::{Notification, TargetAudience, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: NotificationDTO,
}

impl NotificationResponse {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification: NotificationDTO::new(notification),
        }
    }
}

pub mod create_notification {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: String,
        pub scheduled_time: Option<i64>,
        pub target_audience: TargetAudience,
        #[serde(default)]
        pub target_ids: Vec<ID>,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod get_notifications {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct QueryParams {
        pub status: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>) -> Self {
            Self {
                notifications: notifications.into_iter().map(NotificationDTO::new).collect(),
            }
        }
    }
}

pub mod get_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod update_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: Option<String>,
        pub scheduled_time: Option<i64>,
        pub status: Option<String>,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod delete_notification {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod send_notification {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub message: String,
        pub target_audience: TargetAudience,
        #[serde(default)]
        pub target_ids: Vec<ID>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notification: NotificationDTO,
        pub recipient_count: usize,
        pub succeeded: usize,
        pub failed: usize,
    }
}

pub mod process_pending {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub total: usize,
        pub processed: usize,
        pub failed: usize,
    }
}

pub mod transport_status {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub email_configured: bool,
        pub chat_configured: bool,
    }
}
