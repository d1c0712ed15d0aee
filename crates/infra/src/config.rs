use herald_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
}

#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Provider-side id of the sending phone number
    pub sender_id: String,
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// SMTP relay credentials. `None` puts the email transport in stub mode.
    pub email: Option<EmailConfig>,
    /// Chat provider credentials. `None` puts the chat transport in stub mode.
    pub chat: Option<ChatConfig>,
    /// Secret the messaging provider must echo back when subscribing the
    /// inbound webhook
    pub webhook_verify_token: String,
    /// Fixed delay between two consecutive sends in a dispatch loop, the only
    /// backpressure toward provider rate limits
    pub send_delay_millis: u64,
    /// Country code prefixed to bare 10 digit phone numbers
    pub default_country_code: String,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let webhook_verify_token = match std::env::var("WEBHOOK_VERIFY_TOKEN") {
            Ok(token) => token,
            Err(_) => {
                info!("Did not find WEBHOOK_VERIFY_TOKEN environment variable. Going to create one.");
                let token = create_random_secret(16);
                info!(
                    "Webhook verify token was generated and set to: {}",
                    token
                );
                token
            }
        };

        let send_delay_millis = std::env::var("SEND_DELAY_MILLIS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(250);

        let default_country_code =
            std::env::var("DEFAULT_COUNTRY_CODE").unwrap_or_else(|_| "91".into());

        Self {
            port,
            email: Self::email_config(),
            chat: Self::chat_config(),
            webhook_verify_token,
            send_delay_millis,
            default_country_code,
        }
    }

    fn email_config() -> Option<EmailConfig> {
        let smtp_host = std::env::var("SMTP_HOST").ok();
        let smtp_username = std::env::var("SMTP_USERNAME").ok();
        let smtp_password = std::env::var("SMTP_PASSWORD").ok();
        let from_email = std::env::var("EMAIL_FROM").ok();

        match (smtp_host, smtp_username, smtp_password, from_email) {
            (Some(smtp_host), Some(smtp_username), Some(smtp_password), Some(from_email)) => {
                let smtp_port = std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|raw| raw.parse::<u16>().ok())
                    .unwrap_or(587);
                Some(EmailConfig {
                    smtp_host,
                    smtp_port,
                    smtp_username,
                    smtp_password,
                    from_email,
                })
            }
            _ => {
                warn!("SMTP credentials not configured. Emails will be logged only.");
                None
            }
        }
    }

    fn chat_config() -> Option<ChatConfig> {
        match (
            std::env::var("CHAT_SENDER_ID").ok(),
            std::env::var("CHAT_ACCESS_TOKEN").ok(),
        ) {
            (Some(sender_id), Some(access_token)) => Some(ChatConfig {
                sender_id,
                access_token,
            }),
            _ => {
                warn!("Chat provider credentials not configured. Chat messages will be logged only.");
                None
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
