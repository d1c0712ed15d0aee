use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

const CHAT_API_BASE_URL: &str = "https://graph.facebook.com/v18.0";

#[derive(Debug, Serialize)]
pub struct TextBody {
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageCode {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateParameter {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TemplateComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub parameters: Vec<TemplateParameter>,
}

#[derive(Debug, Serialize)]
pub struct TemplateBody {
    pub name: String,
    pub language: LanguageCode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<TemplateComponent>,
}

/// Wire format of the provider's `POST /{senderId}/messages` endpoint
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub messaging_product: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateBody>,
}

impl SendMessageRequest {
    pub fn text(to: String, body: String) -> Self {
        Self {
            messaging_product: "whatsapp".into(),
            to,
            kind: "text".into(),
            text: Some(TextBody { body }),
            template: None,
        }
    }

    pub fn template(to: String, template: TemplateBody) -> Self {
        Self {
            messaging_product: "whatsapp".into(),
            to,
            kind: "template".into(),
            text: None,
            template: Some(template),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderMessage {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub messages: Vec<ProviderMessage>,
}

pub struct ChatRestApi {
    client: Client,
    access_token: String,
    sender_id: String,
}

impl ChatRestApi {
    pub fn new(sender_id: String, access_token: String) -> Self {
        Self {
            client: Client::new(),
            access_token,
            sender_id,
        }
    }

    pub async fn send_message(
        &self,
        body: &SendMessageRequest,
    ) -> anyhow::Result<SendMessageResponse> {
        match self
            .client
            .post(format!(
                "{}/{}/messages",
                CHAT_API_BASE_URL, self.sender_id
            ))
            .header("authorization", format!("Bearer {}", self.access_token))
            .json(body)
            .send()
            .await
        {
            Ok(res) => match res.error_for_status() {
                Ok(res) => res.json::<SendMessageResponse>().await.map_err(|e| {
                    error!(
                        "[Unexpected Response] Chat provider API error. Error message: {:?}",
                        e
                    );
                    anyhow::Error::new(e)
                }),
                Err(e) => {
                    error!(
                        "[Rejected Request] Chat provider API error. Error message: {:?}",
                        e
                    );
                    Err(anyhow::Error::new(e))
                }
            },
            Err(e) => {
                error!(
                    "[Network Error] Chat provider API error. Error message: {:?}",
                    e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}
