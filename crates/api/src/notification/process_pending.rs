use super::dispatcher::dispatch;
use crate::error::HeraldError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use herald_api_structs::process_pending::*;
use herald_infra::HeraldContext;
use tracing::{info, warn};

pub async fn process_pending_controller(
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    let usecase = ProcessPendingUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|outcome| {
            HttpResponse::Ok().json(APIResponse {
                total: outcome.total,
                processed: outcome.processed,
                failed: outcome.failed,
            })
        })
        .map_err(HeraldError::from)
}

#[derive(Debug, Default, PartialEq)]
pub struct SweepOutcome {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
}

/// Dispatches every pending notification whose scheduled time has passed.
/// A failing notification is marked failed and does not stop the sweep.
pub async fn process_due_notifications(ctx: &HeraldContext) -> anyhow::Result<SweepOutcome> {
    let now = ctx.sys.get_timestamp_millis();
    let due = ctx.repos.notifications.find_due_pending(now).await?;

    let mut outcome = SweepOutcome {
        total: due.len(),
        ..Default::default()
    };

    for mut notification in due {
        match dispatch(&mut notification, ctx).await {
            Ok(_) => outcome.processed += 1,
            Err(e) => {
                warn!(
                    "Failed to dispatch due notification {}: {:?}",
                    notification.id, e
                );
                outcome.failed += 1;
            }
        }
    }

    if outcome.total > 0 {
        info!(
            "Processed {} due notifications ({} ok / {} failed)",
            outcome.total, outcome.processed, outcome.failed
        );
    }

    Ok(outcome)
}

#[derive(Debug)]
pub struct ProcessPendingUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    Storage,
}

impl From<UseCaseError> for HeraldError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ProcessPendingUseCase {
    type Response = SweepOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "ProcessPending";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        process_due_notifications(ctx)
            .await
            .map_err(|_| UseCaseError::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_domain::{Category, Notification, NotificationStatus, Recipient, TargetAudience};
    use herald_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn sweeps_only_due_pending_notifications() {
        let mut ctx = setup_context().await;
        ctx.config.send_delay_millis = 0;
        let now = ctx.sys.get_timestamp_millis();

        ctx.repos
            .participants
            .insert(&Recipient {
                id: Default::default(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                phone: "9099325885".into(),
                category: Category::Video,
            })
            .await
            .unwrap();

        let due = Notification::new("Due".into(), now - 1000, TargetAudience::All, Vec::new(), now);
        let future = Notification::new(
            "Future".into(),
            now + 60_000,
            TargetAudience::All,
            Vec::new(),
            now,
        );
        ctx.repos.notifications.insert(&due).await.unwrap();
        ctx.repos.notifications.insert(&future).await.unwrap();

        let outcome = process_due_notifications(&ctx).await.unwrap();
        assert_eq!(
            outcome,
            SweepOutcome {
                total: 1,
                processed: 1,
                failed: 0
            }
        );

        let due = ctx.repos.notifications.find(&due.id).await.unwrap();
        assert_eq!(due.status, NotificationStatus::Sent);
        let future = ctx.repos.notifications.find(&future.id).await.unwrap();
        assert_eq!(future.status, NotificationStatus::Pending);
    }

    #[actix_web::main]
    #[test]
    async fn a_failing_notification_does_not_stop_the_sweep() {
        let mut ctx = setup_context().await;
        ctx.config.send_delay_millis = 0;
        let now = ctx.sys.get_timestamp_millis();

        ctx.repos
            .participants
            .insert(&Recipient {
                id: Default::default(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                phone: "9099325885".into(),
                category: Category::Video,
            })
            .await
            .unwrap();

        // Winners is empty so this one fails to resolve
        let failing = Notification::new(
            "Winners only".into(),
            now - 2000,
            TargetAudience::Winners,
            Vec::new(),
            now,
        );
        let healthy =
            Notification::new("All".into(), now - 1000, TargetAudience::All, Vec::new(), now);
        ctx.repos.notifications.insert(&failing).await.unwrap();
        ctx.repos.notifications.insert(&healthy).await.unwrap();

        let outcome = process_due_notifications(&ctx).await.unwrap();
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.processed, 1);
        assert_eq!(outcome.failed, 1);

        let failing = ctx.repos.notifications.find(&failing.id).await.unwrap();
        assert_eq!(failing.status, NotificationStatus::Failed);
    }
}
