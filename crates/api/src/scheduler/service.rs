use super::jobs::{register_default_jobs, JobCallback};
use chrono::Utc;
use cron::Schedule;
use herald_infra::HeraldContext;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

struct RegisteredJob {
    cron_expression: String,
    handle: actix_web::rt::task::JoinHandle<()>,
}

/// Registry of named recurring jobs. Each registered job owns a spawned
/// loop that sleeps until the next cron tick and then runs its callback.
/// Ticks never catch up: a tick that passes while a callback is still
/// running is skipped. Callbacks are not mutually exclusive, two jobs that
/// fire at the same time run concurrently.
pub struct SchedulerService {
    ctx: HeraldContext,
    jobs: Mutex<HashMap<String, RegisteredJob>>,
}

impl SchedulerService {
    pub fn new(ctx: HeraldContext) -> Self {
        Self {
            ctx,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Arms a job under a unique name. Returns false without side effects
    /// when the name is taken or the cron expression does not parse, the
    /// original job keeps running either way.
    pub fn register(
        &self,
        name: &str,
        cron_expression: &str,
        callback: Arc<dyn JobCallback>,
    ) -> bool {
        let schedule = match Schedule::from_str(cron_expression) {
            Ok(schedule) => schedule,
            Err(e) => {
                warn!(
                    "Rejected job {} with invalid cron expression {}: {}",
                    name, cron_expression, e
                );
                return false;
            }
        };

        let mut jobs = self.jobs.lock().unwrap();
        if jobs.contains_key(name) {
            warn!("Rejected duplicate registration of job {}", name);
            return false;
        }

        let ctx = self.ctx.clone();
        let handle = actix_web::rt::spawn(async move {
            loop {
                // upcoming() only yields future ticks, so there is no
                // catch-up after a long running callback
                let next = match schedule.upcoming(Utc).next() {
                    Some(next) => next,
                    None => break,
                };
                let wait = (next - Utc::now()).to_std().unwrap_or_default();
                actix_web::rt::time::sleep(wait).await;
                callback.run(&ctx).await;
            }
        });

        jobs.insert(
            name.to_string(),
            RegisteredJob {
                cron_expression: cron_expression.to_string(),
                handle,
            },
        );
        info!("Registered job {} with schedule {}", name, cron_expression);
        true
    }

    /// Stops and removes a job. Returns false for unknown names.
    pub fn cancel(&self, name: &str) -> bool {
        let mut jobs = self.jobs.lock().unwrap();
        match jobs.remove(name) {
            Some(job) => {
                job.handle.abort();
                info!("Cancelled job {}", name);
                true
            }
            None => false,
        }
    }

    /// Stops everything and re-registers the default job set
    pub fn restart_all(&self) {
        {
            let mut jobs = self.jobs.lock().unwrap();
            for (_, job) in jobs.drain() {
                job.handle.abort();
            }
        }
        register_default_jobs(self);
        info!("Scheduler restarted with the default job set");
    }

    /// (name, cron expression) pairs of the registered jobs, sorted by name
    pub fn list_jobs(&self) -> Vec<(String, String)> {
        let jobs = self.jobs.lock().unwrap();
        let mut listing: Vec<_> = jobs
            .iter()
            .map(|(name, job)| (name.clone(), job.cron_expression.clone()))
            .collect();
        listing.sort();
        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_infra::setup_context;

    #[derive(Debug)]
    struct NoopJob;

    #[async_trait::async_trait]
    impl JobCallback for NoopJob {
        async fn run(&self, _ctx: &HeraldContext) {}
    }

    #[actix_web::main]
    #[test]
    async fn duplicate_registration_keeps_the_original_job() {
        let scheduler = SchedulerService::new(setup_context().await);
        assert!(scheduler.register("daily", "0 0 9 * * *", Arc::new(NoopJob)));
        assert!(!scheduler.register("daily", "0 30 9 * * *", Arc::new(NoopJob)));

        let jobs = scheduler.list_jobs();
        assert_eq!(jobs, vec![("daily".to_string(), "0 0 9 * * *".to_string())]);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_an_invalid_cron_expression() {
        let scheduler = SchedulerService::new(setup_context().await);
        assert!(!scheduler.register("broken", "not a cron", Arc::new(NoopJob)));
        assert!(scheduler.list_jobs().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn cancel_removes_the_job() {
        let scheduler = SchedulerService::new(setup_context().await);
        assert!(scheduler.register("daily", "0 0 9 * * *", Arc::new(NoopJob)));
        assert!(scheduler.cancel("daily"));
        assert!(!scheduler.cancel("daily"));
        assert!(scheduler.list_jobs().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn restart_reinstalls_the_default_jobs() {
        let scheduler = SchedulerService::new(setup_context().await);
        assert!(scheduler.register("custom", "0 0 9 * * *", Arc::new(NoopJob)));

        scheduler.restart_all();

        let names: Vec<_> = scheduler
            .list_jobs()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            names,
            vec![
                "daily-morning-reminder",
                "deadline-reminder",
                "process-pending",
                "weekly-checkin"
            ]
        );
    }
}
