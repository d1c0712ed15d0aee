use crate::dtos::WebhookEvent;
use serde::{Deserialize, Serialize};

pub mod verify_webhook {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(rename = "hub.mode")]
        pub mode: Option<String>,
        #[serde(rename = "hub.verify_token")]
        pub verify_token: Option<String>,
        #[serde(rename = "hub.challenge")]
        pub challenge: Option<String>,
    }

    // The provider expects the raw challenge string echoed back
    pub type APIResponse = String;
}

pub mod receive_webhook_event {
    use super::*;

    pub type RequestBody = WebhookEvent;

    pub type APIResponse = String;
}
