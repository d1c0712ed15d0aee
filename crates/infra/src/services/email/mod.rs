use super::{TransportResult, STUB_MESSAGE_ID};
use crate::config::EmailConfig;
use herald_domain::EmailPayload;
use lettre::{
    message::{header::ContentType, Attachment, Body, Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info, warn};

enum Mode {
    Smtp {
        transport: AsyncSmtpTransport<Tokio1Executor>,
        from: Mailbox,
    },
    /// No relay credentials configured: log the would-be payload and report
    /// a synthetic success so upstream code paths stay identical
    Stub,
}

pub struct EmailService {
    mode: Mode,
}

impl EmailService {
    pub fn new(config: Option<EmailConfig>) -> Self {
        let mode = match config {
            Some(config) => match Self::build_smtp(&config) {
                Ok(mode) => {
                    info!("Email transport configured against {}", config.smtp_host);
                    mode
                }
                Err(e) => {
                    warn!(
                        "Failed to initialize SMTP transport, falling back to stub mode: {}",
                        e
                    );
                    Mode::Stub
                }
            },
            None => Mode::Stub,
        };
        Self { mode }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self.mode, Mode::Smtp { .. })
    }

    fn build_smtp(config: &EmailConfig) -> anyhow::Result<Mode> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();
        let from = config.from_email.parse::<Mailbox>()?;
        Ok(Mode::Smtp { transport, from })
    }

    /// Sends one email. Never returns `Err`: provider and message building
    /// failures are captured in the returned `TransportResult`.
    pub async fn send(&self, to: &str, payload: &EmailPayload) -> TransportResult {
        let (transport, from) = match &self.mode {
            Mode::Smtp { transport, from } => (transport, from),
            Mode::Stub => {
                info!(
                    "[EMAIL LOG] To: {} | Subject: {} | Attachments: {}",
                    to,
                    payload.subject,
                    payload.attachments.len()
                );
                return TransportResult::ok(STUB_MESSAGE_ID.into());
            }
        };

        let email = match Self::build_message(from, to, payload) {
            Ok(email) => email,
            Err(e) => {
                error!("Failed to build email to {}: {}", to, e);
                return TransportResult::failed(e.to_string());
            }
        };

        match transport.send(email).await {
            Ok(response) => {
                let message_id = response.message().collect::<Vec<_>>().join(" ");
                info!("Email sent to {}: {}", to, message_id);
                TransportResult::ok(message_id)
            }
            Err(e) => {
                error!("Error sending email to {}: {}", to, e);
                TransportResult::failed(e.to_string())
            }
        }
    }

    fn build_message(from: &Mailbox, to: &str, payload: &EmailPayload) -> anyhow::Result<Message> {
        let mut body = MultiPart::related().multipart(MultiPart::alternative_plain_html(
            payload.text.clone(),
            payload.html.clone(),
        ));
        for attachment in &payload.attachments {
            body = body.singlepart(
                Attachment::new_inline(attachment.content_id.clone()).body(
                    Body::new(attachment.content.clone()),
                    ContentType::parse("image/png")?,
                ),
            );
        }

        let email = Message::builder()
            .from(from.clone())
            .to(to.parse::<Mailbox>()?)
            .subject(&payload.subject)
            .multipart(body)?;
        Ok(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> EmailPayload {
        EmailPayload {
            subject: "Hello".into(),
            html: "<p>Hello</p>".into(),
            text: "Hello".into(),
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn stub_mode_always_reports_success() {
        let service = EmailService::new(None);
        assert!(!service.is_configured());

        let res = service.send("ada@example.com", &payload()).await;
        assert!(res.success);
        assert_eq!(res.message_id.as_deref(), Some(STUB_MESSAGE_ID));
        assert!(res.error.is_none());
    }

    #[tokio::test]
    async fn stub_mode_accepts_any_well_formed_input() {
        let service = EmailService::new(None);
        for to in ["a@b.c", "not-even-an-address", ""] {
            let res = service.send(to, &payload()).await;
            assert!(res.success);
        }
    }
}
