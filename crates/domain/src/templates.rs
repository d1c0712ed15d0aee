use crate::recipient::Recipient;
use chrono::{DateTime, Utc};
use image::ImageEncoder;
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content-id of the inline QR image, referenced from the HTML body
pub const QR_CONTENT_ID: &str = "participant-qrcode";

const QR_SIZE_PX: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    fn accent_color(&self) -> &'static str {
        match self {
            Self::Low => "#4caf50",
            Self::Medium => "#ff6e14",
            Self::High => "#d32f2f",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// The closed set of message kinds this system can render. Each variant
/// carries exactly the context its templates need.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    Registration,
    Approval { event_date: i64 },
    Rejection,
    EventReminder { event_date: i64 },
    PasswordReset { new_password: String },
    Broadcast { message: String, priority: Priority },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailPayload {
    pub subject: String,
    pub html: String,
    pub text: String,
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatPayload {
    Text { body: String },
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to generate QR code: {0}")]
    QrGeneration(String),
}

/// Renders the email payload for a (kind, recipient) pair. Deterministic for
/// fixed inputs, which keeps the templates golden-output testable.
pub fn render_email(
    kind: &MessageKind,
    recipient: &Recipient,
) -> Result<EmailPayload, TemplateError> {
    let payload = match kind {
        MessageKind::Registration => registration_email(recipient),
        MessageKind::Approval { event_date } => approval_email(recipient, *event_date)?,
        MessageKind::Rejection => rejection_email(recipient),
        MessageKind::EventReminder { event_date } => reminder_email(recipient, *event_date)?,
        MessageKind::PasswordReset { new_password } => {
            password_reset_email(recipient, new_password)
        }
        MessageKind::Broadcast { message, priority } => broadcast_email(message, *priority),
    };
    Ok(payload)
}

/// Renders the chat payload for a (kind, recipient) pair
pub fn render_chat(kind: &MessageKind, recipient: &Recipient) -> ChatPayload {
    let body = match kind {
        MessageKind::Registration => format!(
            "*Registration received!*\n\nHi {}!\n\nYour registration is in. Our team is reviewing your portfolio in the {} category and you will hear from us once the review is complete.",
            recipient.name,
            recipient.category.display_name(),
        ),
        MessageKind::Approval { event_date } => {
            let (date, time) = format_event_date(*event_date);
            format!(
                "*Congratulations {}!*\n\nYour portfolio has been approved.\n\n*Category:* {}\n*Date:* {}\n*Time:* {}\n\nYour entry QR code has been sent to your email address.",
                recipient.name,
                recipient.category.display_name(),
                date,
                time,
            )
        }
        MessageKind::Rejection => format!(
            "Hi {},\n\nThank you for applying. After careful review we are unable to offer you a spot this time. We hope to see your work again next year.",
            recipient.name,
        ),
        MessageKind::EventReminder { event_date } => {
            let (date, time) = format_event_date(*event_date);
            format!(
                "*Reminder*\n\nHi {}!\n\nThe event starts on {} at {}. Bring your entry QR code (sent by email) and your energy.\n\nDon't forget to submit your work on time!",
                recipient.name, date, time,
            )
        }
        MessageKind::PasswordReset { new_password } => format!(
            "Hi {},\n\nYour password has been reset. Your new temporary password is: {}\n\nPlease log in and change it as soon as possible.",
            recipient.name, new_password,
        ),
        MessageKind::Broadcast { message, .. } => format!(
            "*Update*\n\nHi {}!\n\n{}\n\nStay tuned for more updates.",
            recipient.name, message,
        ),
    };
    ChatPayload::Text { body }
}

/// Derives a plain text fallback by stripping markup from an HTML body.
/// Style and script blocks are removed wholesale, remaining tags are
/// replaced with whitespace and runs of whitespace are collapsed.
pub fn html_to_text(html: &str) -> String {
    let without_blocks = strip_block(&strip_block(html, "style"), "script");

    let mut text = String::with_capacity(without_blocks.len());
    let mut in_tag = false;
    for c in without_blocks.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Removes <tag ...>...</tag> sections; tags are matched lowercase as emitted
fn strip_block(html: &str, tag: &str) -> String {
    let open = format!("<{}", tag);
    let close = format!("</{}>", tag);

    let mut out = String::with_capacity(html.len());
    let mut pos = 0;
    while let Some(start) = html[pos..].find(&open) {
        let start = pos + start;
        out.push_str(&html[pos..start]);
        match html[start..].find(&close) {
            Some(end) => pos = start + end + close.len(),
            None => return out,
        }
    }
    out.push_str(&html[pos..]);
    out
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn format_event_date(timestamp_millis: i64) -> (String, String) {
    let date_time = DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    (
        date_time.format("%A, %B %-d, %Y").to_string(),
        date_time.format("%-I:%M %p").to_string(),
    )
}

fn qr_png(data: &str) -> Result<Vec<u8>, TemplateError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)
        .map_err(|e| TemplateError::QrGeneration(e.to_string()))?;
    let img = code
        .render::<image::Luma<u8>>()
        .min_dimensions(QR_SIZE_PX, QR_SIZE_PX)
        .build();

    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e| TemplateError::QrGeneration(e.to_string()))?;
    Ok(bytes)
}

fn qr_attachment(recipient: &Recipient) -> Result<EmailAttachment, TemplateError> {
    Ok(EmailAttachment {
        filename: "qrcode.png".into(),
        content: qr_png(&recipient.id.as_string())?,
        content_id: QR_CONTENT_ID.into(),
    })
}

// Base wrapper shared by every email, dark shell around a light card
fn email_wrapper(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="UTF-8"><meta name="viewport" content="width=device-width, initial-scale=1.0"></head>
<body style="margin: 0; padding: 0; background-color: #000000; font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif;">
  <table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="background-color: #000000;">
    <tr><td style="padding: 40px 20px;">
      <table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="max-width: 600px; margin: 0 auto; background-color: #e3e3db;">
        {}
      </table>
    </td></tr>
  </table>
</body>
</html>"#,
        content
    )
}

fn email_header(title: &str, accent_color: &str) -> String {
    format!(
        r#"<tr><td style="padding: 60px 40px 40px; text-align: center; background-color: #1a1614;">
  <h1 style="margin: 0 0 12px; font-size: 28px; font-weight: 700; color: #e3e3db; text-transform: uppercase; letter-spacing: 1px;">{}</h1>
  <div style="width: 60px; height: 3px; background-color: {}; margin: 0 auto;"></div>
</td></tr>"#,
        html_escape(title),
        accent_color,
    )
}

fn email_footer() -> &'static str {
    r#"<tr><td style="padding: 30px 40px; background-color: #1a1614; text-align: center;">
  <p style="margin: 0; font-size: 13px; font-weight: 600; color: #e3e3db; text-transform: uppercase; letter-spacing: 1px;">The Event Team</p>
</td></tr>"#
}

fn email_body(inner: &str) -> String {
    format!(
        r#"<tr><td style="padding: 50px 40px; background-color: #e3e3db;">{}</td></tr>"#,
        inner
    )
}

fn paragraph(text: &str) -> String {
    format!(
        r#"<p style="margin: 0 0 24px; font-size: 16px; line-height: 1.6; color: #1a1614;">{}</p>"#,
        text
    )
}

fn info_box(title: &str, items: &[String]) -> String {
    let rows: String = items
        .iter()
        .map(|item| {
            format!(
                r#"<p style="margin: 0 0 8px; font-size: 14px; line-height: 1.8; color: #1a1614;">{}</p>"#,
                item
            )
        })
        .collect();
    format!(
        r#"<table role="presentation" cellspacing="0" cellpadding="0" border="0" width="100%" style="background-color: #ccccc4; border-left: 4px solid #ff6e14;">
  <tr><td style="padding: 24px;">
    <p style="margin: 0 0 16px; font-size: 15px; font-weight: 600; color: #1a1614; text-transform: uppercase; letter-spacing: 0.5px;">{}</p>
    {}
  </td></tr>
</table>"#,
        html_escape(title),
        rows,
    )
}

fn qr_block() -> String {
    format!(
        r#"<div style="text-align: center; margin: 32px 0;">
  <img src="cid:{}" alt="Entry QR code" width="200" height="200" style="display: inline-block;"/>
  <p style="margin: 12px 0 0; font-size: 13px; color: #8c7e77;">Show this QR code at the entrance</p>
</div>"#,
        QR_CONTENT_ID
    )
}

fn finish(subject: String, html: String, attachments: Vec<EmailAttachment>) -> EmailPayload {
    let text = html_to_text(&html);
    EmailPayload {
        subject,
        html,
        text,
        attachments,
    }
}

fn registration_email(recipient: &Recipient) -> EmailPayload {
    let inner = format!(
        "{}{}{}",
        paragraph(&format!(
            "Hi {}, your registration has been successfully received.",
            html_escape(&recipient.name)
        )),
        paragraph(&format!(
            "Our team is currently reviewing your {} portfolio. You will receive an email notification once the review is complete.",
            recipient.category.display_name()
        )),
        info_box(
            "What's Next",
            &[
                "Portfolio review within 24-48 hours".into(),
                "Email notification with the decision".into(),
                "Event details and QR code if approved".into(),
            ],
        ),
    );
    let html = email_wrapper(&format!(
        "{}{}{}",
        email_header("Registration Received", "#ff6e14"),
        email_body(&inner),
        email_footer(),
    ));
    finish(
        "Registration Received - Portfolio Under Review".into(),
        html,
        Vec::new(),
    )
}

fn approval_email(recipient: &Recipient, event_date: i64) -> Result<EmailPayload, TemplateError> {
    let (date, time) = format_event_date(event_date);
    let inner = format!(
        "{}{}{}",
        paragraph(&format!(
            "Congratulations {}! Your portfolio has been approved and your spot is confirmed.",
            html_escape(&recipient.name)
        )),
        info_box(
            "Event Details",
            &[
                format!("Category: {}", recipient.category.display_name()),
                format!("Date: {}", date),
                format!("Time: {}", time),
            ],
        ),
        qr_block(),
    );
    let html = email_wrapper(&format!(
        "{}{}{}",
        email_header("You're In", "#4caf50"),
        email_body(&inner),
        email_footer(),
    ));
    Ok(finish(
        "Congratulations - Your Portfolio Is Approved".into(),
        html,
        vec![qr_attachment(recipient)?],
    ))
}

fn rejection_email(recipient: &Recipient) -> EmailPayload {
    let inner = format!(
        "{}{}",
        paragraph(&format!(
            "Hi {}, thank you for taking the time to apply.",
            html_escape(&recipient.name)
        )),
        paragraph(
            "After careful review of all submissions, we are unable to offer you a spot this time. \
             The selection was highly competitive and this is not a reflection of your talent. \
             We hope to see your work again next year.",
        ),
    );
    let html = email_wrapper(&format!(
        "{}{}{}",
        email_header("Application Update", "#ff6e14"),
        email_body(&inner),
        email_footer(),
    ));
    finish("An Update on Your Application".into(), html, Vec::new())
}

fn reminder_email(recipient: &Recipient, event_date: i64) -> Result<EmailPayload, TemplateError> {
    let (date, time) = format_event_date(event_date);
    let inner = format!(
        "{}{}{}",
        paragraph(&format!(
            "Hi {}, this is a friendly reminder that the event is almost here!",
            html_escape(&recipient.name)
        )),
        info_box(
            "When and What",
            &[
                format!("Date: {}", date),
                format!("Time: {}", time),
                format!("Category: {}", recipient.category.display_name()),
                "Bring your laptop, charger and this QR code".into(),
            ],
        ),
        qr_block(),
    );
    let html = email_wrapper(&format!(
        "{}{}{}",
        email_header("Event Reminder", "#ff6e14"),
        email_body(&inner),
        email_footer(),
    ));
    Ok(finish(
        "Reminder: The Event Is Coming Up".into(),
        html,
        vec![qr_attachment(recipient)?],
    ))
}

fn password_reset_email(recipient: &Recipient, new_password: &str) -> EmailPayload {
    let inner = format!(
        "{}{}{}",
        paragraph(&format!(
            "Hi {}, your password has been reset.",
            html_escape(&recipient.name)
        )),
        info_box(
            "Your New Password",
            &[html_escape(new_password)],
        ),
        paragraph("Please log in with this temporary password and change it as soon as possible."),
    );
    let html = email_wrapper(&format!(
        "{}{}{}",
        email_header("Password Reset", "#ff6e14"),
        email_body(&inner),
        email_footer(),
    ));
    finish("Your New Password".into(), html, Vec::new())
}

fn broadcast_email(message: &str, priority: Priority) -> EmailPayload {
    let inner = format!(
        "{}{}",
        paragraph(&html_escape(message).replace('\n', "<br/>")),
        format!(
            r#"<p style="margin: 32px 0 0; font-size: 12px; color: #8c7e77; text-transform: uppercase; letter-spacing: 1px;">Priority: {}</p>"#,
            priority.label()
        ),
    );
    let html = email_wrapper(&format!(
        "{}{}{}",
        email_header("Announcement", priority.accent_color()),
        email_body(&inner),
        email_footer(),
    ));
    finish(
        format!("[{}] Event Announcement", priority.label()),
        html,
        Vec::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipient::Category;

    fn recipient() -> Recipient {
        Recipient {
            id: "a574624d-7c7f-456c-bbdd-670710302d45".parse().expect("Valid ID"),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "9099325885".into(),
            category: Category::Video,
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let kind = MessageKind::Approval {
            event_date: 1_763_197_200_000,
        };
        let first = render_email(&kind, &recipient()).unwrap();
        let second = render_email(&kind, &recipient()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn approval_email_carries_inline_qr() {
        let kind = MessageKind::Approval {
            event_date: 1_763_197_200_000,
        };
        let payload = render_email(&kind, &recipient()).unwrap();
        assert_eq!(payload.attachments.len(), 1);
        let attachment = &payload.attachments[0];
        assert_eq!(attachment.content_id, QR_CONTENT_ID);
        assert!(!attachment.content.is_empty());
        // PNG magic bytes
        assert_eq!(&attachment.content[..4], &[0x89, b'P', b'N', b'G']);
        assert!(payload
            .html
            .contains(&format!("cid:{}", QR_CONTENT_ID)));
    }

    #[test]
    fn text_fallback_is_derived_from_html() {
        let kind = MessageKind::Registration;
        let payload = render_email(&kind, &recipient()).unwrap();
        assert!(!payload.text.is_empty());
        assert!(!payload.text.contains('<'));
        assert!(payload.text.contains("Ada"));
    }

    #[test]
    fn password_reset_embeds_credential() {
        let kind = MessageKind::PasswordReset {
            new_password: "s3cr3t-pass".into(),
        };
        let payload = render_email(&kind, &recipient()).unwrap();
        assert!(payload.html.contains("s3cr3t-pass"));
        assert!(payload.text.contains("s3cr3t-pass"));
    }

    #[test]
    fn broadcast_is_wrapped_by_priority_shell() {
        let kind = MessageKind::Broadcast {
            message: "Submissions close at noon".into(),
            priority: Priority::High,
        };
        let payload = render_email(&kind, &recipient()).unwrap();
        assert!(payload.subject.starts_with("[HIGH]"));
        assert!(payload.html.contains(Priority::High.accent_color()));
        assert!(payload.text.contains("Submissions close at noon"));
    }

    #[test]
    fn broadcast_chat_greets_recipient_by_name() {
        let kind = MessageKind::Broadcast {
            message: "Submissions close at noon".into(),
            priority: Priority::Medium,
        };
        let ChatPayload::Text { body } = render_chat(&kind, &recipient());
        assert!(body.contains("Hi Ada!"));
        assert!(body.contains("Submissions close at noon"));
    }

    #[test]
    fn html_to_text_strips_markup_and_style_blocks() {
        let html = "<html><style>.a { color: red; }</style><body><h1>Title</h1>\n<p>Hello   <b>world</b></p></body></html>";
        assert_eq!(html_to_text(html), "Title Hello world");
    }

    #[test]
    fn html_to_text_escaped_content_survives() {
        let html = "<p>Tom &amp; Jerry</p>";
        assert_eq!(html_to_text(html), "Tom &amp; Jerry");
    }
}
