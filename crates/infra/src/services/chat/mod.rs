mod messaging_api;

use super::{TransportResult, STUB_MESSAGE_ID};
use crate::config::ChatConfig;
use messaging_api::{
    ChatRestApi, LanguageCode, SendMessageRequest, TemplateBody, TemplateComponent,
    TemplateParameter,
};
use tracing::info;

/// A provider-registered message template with positional body parameters
#[derive(Debug, Clone)]
pub struct ChatTemplate {
    pub name: String,
    pub language_code: String,
    pub parameters: Vec<String>,
}

impl From<ChatTemplate> for TemplateBody {
    fn from(template: ChatTemplate) -> Self {
        let components = if template.parameters.is_empty() {
            Vec::new()
        } else {
            vec![TemplateComponent {
                kind: "body".into(),
                parameters: template
                    .parameters
                    .into_iter()
                    .map(|text| TemplateParameter {
                        kind: "text".into(),
                        text,
                    })
                    .collect(),
            }]
        };
        Self {
            name: template.name,
            language: LanguageCode {
                code: template.language_code,
            },
            components,
        }
    }
}

enum Mode {
    Live(ChatRestApi),
    Stub,
}

pub struct ChatService {
    mode: Mode,
    default_country_code: String,
}

impl ChatService {
    pub fn new(config: Option<ChatConfig>, default_country_code: String) -> Self {
        let mode = match config {
            Some(config) => {
                info!("Chat transport configured for sender {}", config.sender_id);
                Mode::Live(ChatRestApi::new(config.sender_id, config.access_token))
            }
            None => Mode::Stub,
        };
        Self {
            mode,
            default_country_code,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.mode, Mode::Live(_))
    }

    pub async fn send_text(&self, to: &str, body: &str) -> TransportResult {
        let to = normalize_phone_number(to, &self.default_country_code);
        self.send(SendMessageRequest::text(to, body.into())).await
    }

    pub async fn send_template(&self, to: &str, template: ChatTemplate) -> TransportResult {
        let to = normalize_phone_number(to, &self.default_country_code);
        self.send(SendMessageRequest::template(to, template.into()))
            .await
    }

    async fn send(&self, request: SendMessageRequest) -> TransportResult {
        let api = match &self.mode {
            Mode::Live(api) => api,
            Mode::Stub => {
                info!(
                    "[CHAT LOG] To: {} | Type: {}",
                    request.to, request.kind
                );
                return TransportResult::ok(STUB_MESSAGE_ID.into());
            }
        };

        match api.send_message(&request).await {
            Ok(response) => {
                let message_id = response
                    .messages
                    .into_iter()
                    .next()
                    .map(|m| m.id)
                    .unwrap_or_default();
                info!("Chat message sent to {}: {}", request.to, message_id);
                TransportResult::ok(message_id)
            }
            Err(e) => TransportResult::failed(e.to_string()),
        }
    }
}

/// Normalizes a destination number for the provider: digits only, no `+` or
/// `00` prefix, with a country code. A single leading zero is dropped, and a
/// bare 10 digit number gets the default country code prefixed. Idempotent.
pub fn normalize_phone_number(phone: &str, default_country_code: &str) -> String {
    let mut cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if cleaned.starts_with('0') {
        cleaned.remove(0);
    }

    if cleaned.len() == 10 && !cleaned.starts_with(default_country_code) {
        cleaned = format!("{}{}", default_country_code, cleaned);
    }

    cleaned
}
