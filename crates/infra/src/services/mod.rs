mod chat;
mod email;

pub use chat::{normalize_phone_number, ChatService, ChatTemplate};
pub use email::EmailService;

use crate::config::Config;
use std::sync::Arc;

/// Placeholder provider message id returned by transports in stub mode
pub const STUB_MESSAGE_ID: &str = "mock-id";

/// Outcome of one provider call. Transports never return `Err`; provider and
/// network failures are folded into a failed `TransportResult` so that every
/// upstream code path is identical between configured and stub deployments.
#[derive(Debug, Clone)]
pub struct TransportResult {
    pub success: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

impl TransportResult {
    pub fn ok(message_id: String) -> Self {
        Self {
            success: true,
            message_id: Some(message_id),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error),
        }
    }
}

#[derive(Clone)]
pub struct Transports {
    pub email: Arc<EmailService>,
    pub chat: Arc<ChatService>,
}

impl Transports {
    pub fn create(config: &Config) -> Self {
        Self {
            email: Arc::new(EmailService::new(config.email.clone())),
            chat: Arc::new(ChatService::new(
                config.chat.clone(),
                config.default_country_code.clone(),
            )),
        }
    }
}
