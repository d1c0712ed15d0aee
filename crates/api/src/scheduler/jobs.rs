use super::service::SchedulerService;
use crate::notification::dispatcher::dispatch;
use crate::notification::process_pending::process_due_notifications;
use herald_domain::{JobTarget, Notification, TargetAudience};
use herald_infra::HeraldContext;
use std::sync::Arc;
use tracing::{error, warn};

#[async_trait::async_trait]
pub trait JobCallback: Send + Sync {
    async fn run(&self, ctx: &HeraldContext);
}

/// Creates and dispatches a notification to the job's target every time the
/// job fires. Phone targets bypass the notification store and go straight
/// out over chat.
pub struct BroadcastJob {
    pub target: JobTarget,
    pub message: String,
}

#[async_trait::async_trait]
impl JobCallback for BroadcastJob {
    async fn run(&self, ctx: &HeraldContext) {
        let audience = match &self.target {
            JobTarget::Phone { number } => {
                let res = ctx.transports.chat.send_text(number, &self.message).await;
                if !res.success {
                    warn!(
                        "Scheduled chat message to {} failed: {:?}",
                        number, res.error
                    );
                }
                return;
            }
            JobTarget::All => TargetAudience::All,
            JobTarget::Category { tag } => TargetAudience::Category { tag: *tag },
        };

        let now = ctx.sys.get_timestamp_millis();
        let mut notification =
            Notification::new(self.message.clone(), now, audience, Vec::new(), now);
        if ctx.repos.notifications.insert(&notification).await.is_err() {
            error!("Failed to store notification for scheduled broadcast");
            return;
        }
        if let Err(e) = dispatch(&mut notification, ctx).await {
            warn!("Scheduled broadcast failed: {:?}", e);
        }
    }
}

/// Sweeps due pending notifications out of the store
pub struct ProcessPendingJob;

#[async_trait::async_trait]
impl JobCallback for ProcessPendingJob {
    async fn run(&self, ctx: &HeraldContext) {
        if let Err(e) = process_due_notifications(ctx).await {
            error!("Pending notification sweep failed: {:?}", e);
        }
    }
}

/// The fixed job set armed at startup and on scheduler restart.
/// Cron expressions have a seconds field and are evaluated in UTC.
pub fn register_default_jobs(scheduler: &SchedulerService) {
    let broadcasts = [
        (
            "daily-morning-reminder",
            "0 0 9 * * *",
            "Good morning! Remember to keep working on your submission, the clock is ticking.",
        ),
        (
            "deadline-reminder",
            "0 0 18 * * *",
            "Heads up! The submission deadline is getting closer. Make sure your latest work is uploaded.",
        ),
        (
            "weekly-checkin",
            "0 0 10 * * Mon",
            "Weekly check-in: how is your submission coming along? Reach out to the team if you are stuck.",
        ),
    ];
    for (name, cron_expression, message) in broadcasts {
        scheduler.register(
            name,
            cron_expression,
            Arc::new(BroadcastJob {
                target: JobTarget::All,
                message: message.into(),
            }),
        );
    }

    scheduler.register("process-pending", "0 */5 * * * *", Arc::new(ProcessPendingJob));
}
