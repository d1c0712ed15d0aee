use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChatTemplateDTO {
    pub name: String,
    pub language_code: String,
    #[serde(default)]
    pub parameters: Vec<String>,
}

pub mod send_chat_message {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub phone_number: String,
        pub message: Option<String>,
        pub template: Option<ChatTemplateDTO>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message_id: Option<String>,
    }
}
