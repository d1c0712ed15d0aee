use serde::{Deserialize, Serialize};

/// Event payload posted by the chat provider. Field names follow the
/// provider's wire format, unknown fields are ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub field: String,
    pub value: WebhookChangeValue,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookChangeValue {
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
    #[serde(default)]
    pub statuses: Vec<DeliveryStatusUpdate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InboundMessage {
    pub from: String,
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub text: Option<InboundText>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InboundText {
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeliveryStatusUpdate {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub recipient_id: String,
}
