use super::resolve_recipients::{resolve_recipients, ResolutionError};
use herald_domain::{
    templates::{self, ChatPayload, MessageKind, Priority},
    Channel, DeliveryResult, DispatchSummary, Notification, Recipient,
};
use herald_infra::HeraldContext;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug)]
pub enum DispatchError {
    Resolution(ResolutionError),
    Persistence,
}

/// Sends a notification to every resolved recipient over both channels.
///
/// Sends are sequential with a fixed pause between consecutive provider
/// calls, including between the email and chat sends for a single recipient,
/// so a large audience does not hammer the providers. Individual transport
/// failures are counted and logged but never stop the loop; the notification
/// ends up `Sent` as long as the recipient list itself could be resolved.
/// There is no retry, every (recipient, channel) pair gets at most one
/// attempt.
///
/// The dispatcher takes no locks. Callers must not run two dispatches of the
/// same notification concurrently.
pub async fn dispatch(
    notification: &mut Notification,
    ctx: &HeraldContext,
) -> Result<DispatchSummary, DispatchError> {
    let recipients =
        match resolve_recipients(&notification.target_audience, &notification.target_ids, ctx)
            .await
        {
            Ok(recipients) => recipients,
            Err(e) => {
                notification.mark_failed();
                if ctx.repos.notifications.save(notification).await.is_err() {
                    error!(
                        "Failed to persist failed status for notification {}",
                        notification.id
                    );
                }
                return Err(DispatchError::Resolution(e));
            }
        };

    let kind = MessageKind::Broadcast {
        message: notification.message.clone(),
        priority: Priority::Medium,
    };

    let mut summary = DispatchSummary {
        total: recipients.len(),
        succeeded: 0,
        failed: 0,
    };
    let pause = Duration::from_millis(ctx.config.send_delay_millis);

    for (i, recipient) in recipients.iter().enumerate() {
        if i > 0 {
            actix_web::rt::time::sleep(pause).await;
        }

        let results = send_to_recipient(&kind, recipient, ctx, pause).await;
        let delivered = !results.is_empty() && results.iter().all(|r| r.success);
        if delivered {
            summary.succeeded += 1;
        } else {
            summary.failed += 1;
            for result in results.iter().filter(|r| !r.success) {
                warn!(
                    "Delivery to recipient {} over {:?} failed: {:?}",
                    result.recipient_id, result.channel, result.error
                );
            }
        }
    }

    notification.mark_sent(ctx.sys.get_timestamp_millis());
    if ctx.repos.notifications.save(notification).await.is_err() {
        error!(
            "Failed to persist sent status for notification {}",
            notification.id
        );
        return Err(DispatchError::Persistence);
    }

    info!(
        "Notification {} dispatched to {} recipients ({} ok / {} failed)",
        notification.id, summary.total, summary.succeeded, summary.failed
    );

    Ok(summary)
}

async fn send_to_recipient(
    kind: &MessageKind,
    recipient: &Recipient,
    ctx: &HeraldContext,
    pause: Duration,
) -> Vec<DeliveryResult> {
    let mut results = Vec::new();

    if !recipient.email.is_empty() {
        let result = match templates::render_email(kind, recipient) {
            Ok(payload) => {
                let res = ctx.transports.email.send(&recipient.email, &payload).await;
                DeliveryResult {
                    recipient_id: recipient.id.clone(),
                    channel: Channel::Email,
                    success: res.success,
                    provider_message_id: res.message_id,
                    error: res.error,
                }
            }
            Err(e) => DeliveryResult {
                recipient_id: recipient.id.clone(),
                channel: Channel::Email,
                success: false,
                provider_message_id: None,
                error: Some(e.to_string()),
            },
        };
        results.push(result);
    }

    if !recipient.phone.is_empty() {
        if !results.is_empty() {
            actix_web::rt::time::sleep(pause).await;
        }
        let ChatPayload::Text { body } = templates::render_chat(kind, recipient);
        let res = ctx.transports.chat.send_text(&recipient.phone, &body).await;
        results.push(DeliveryResult {
            recipient_id: recipient.id.clone(),
            channel: Channel::Chat,
            success: res.success,
            provider_message_id: res.message_id,
            error: res.error,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_domain::{Category, NotificationStatus, TargetAudience};
    use herald_infra::setup_context;

    fn recipient(name: &str) -> Recipient {
        Recipient {
            id: Default::default(),
            name: name.into(),
            email: format!("{}@example.com", name),
            phone: "9099325885".into(),
            category: Category::Graphics,
        }
    }

    #[actix_web::main]
    #[test]
    async fn delivers_to_every_recipient_in_stub_mode() {
        let mut ctx = setup_context().await;
        ctx.config.send_delay_millis = 0;
        for name in ["ada", "grace", "linus"] {
            ctx.repos
                .participants
                .insert(&recipient(name))
                .await
                .unwrap();
        }

        let mut notification = Notification::new(
            "Submissions close tonight".into(),
            0,
            TargetAudience::All,
            Vec::new(),
            0,
        );
        ctx.repos.notifications.insert(&notification).await.unwrap();

        let summary = dispatch(&mut notification, &ctx).await.unwrap();
        assert_eq!(
            summary,
            DispatchSummary {
                total: 3,
                succeeded: 3,
                failed: 0
            }
        );
        assert_eq!(notification.status, NotificationStatus::Sent);
        assert!(notification.sent_at.is_some());

        let stored = ctx.repos.notifications.find(&notification.id).await.unwrap();
        assert_eq!(stored.status, NotificationStatus::Sent);
    }

    #[actix_web::main]
    #[test]
    async fn pauses_between_email_and_chat_sends_for_one_recipient() {
        let mut ctx = setup_context().await;
        ctx.config.send_delay_millis = 80;
        ctx.repos.participants.insert(&recipient("ada")).await.unwrap();

        let mut notification = Notification::new(
            "Doors open at nine".into(),
            0,
            TargetAudience::All,
            Vec::new(),
            0,
        );
        ctx.repos.notifications.insert(&notification).await.unwrap();

        let started = std::time::Instant::now();
        let summary = dispatch(&mut notification, &ctx).await.unwrap();
        assert_eq!(summary.succeeded, 1);
        assert!(started.elapsed() >= Duration::from_millis(80));
    }

    #[actix_web::main]
    #[test]
    async fn empty_audience_marks_the_notification_failed() {
        let ctx = setup_context().await;

        let mut notification = Notification::new(
            "Hello winners".into(),
            0,
            TargetAudience::Winners,
            Vec::new(),
            0,
        );
        ctx.repos.notifications.insert(&notification).await.unwrap();

        let err = dispatch(&mut notification, &ctx).await.unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Resolution(ResolutionError::EmptyAudience)
        ));
        assert_eq!(notification.status, NotificationStatus::Failed);

        let stored = ctx.repos.notifications.find(&notification.id).await.unwrap();
        assert_eq!(stored.status, NotificationStatus::Failed);
    }
}
