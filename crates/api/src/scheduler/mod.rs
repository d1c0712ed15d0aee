mod jobs;
mod service;

pub use jobs::register_default_jobs;
pub use service::SchedulerService;

use crate::error::HeraldError;
use actix_web::{web, HttpResponse};
use cron::Schedule;
use herald_api_structs::dtos::ScheduledJobDTO;
use herald_api_structs::{
    cancel_scheduler_job, create_scheduler_job, get_scheduler_jobs, restart_scheduler,
};
use jobs::BroadcastJob;
use std::str::FromStr;
use std::sync::Arc;

fn job_listing(scheduler: &SchedulerService) -> Vec<ScheduledJobDTO> {
    scheduler
        .list_jobs()
        .into_iter()
        .map(|(name, cron_expression)| ScheduledJobDTO {
            name,
            cron_expression,
        })
        .collect()
}

async fn get_jobs_controller(scheduler: web::Data<SchedulerService>) -> HttpResponse {
    HttpResponse::Ok().json(get_scheduler_jobs::APIResponse {
        jobs: job_listing(&scheduler),
    })
}

async fn create_job_controller(
    body_params: web::Json<create_scheduler_job::RequestBody>,
    scheduler: web::Data<SchedulerService>,
) -> Result<HttpResponse, HeraldError> {
    let body = body_params.0;
    if body.message.trim().is_empty() {
        return Err(HeraldError::BadClientData(
            "The message cannot be empty.".into(),
        ));
    }
    if Schedule::from_str(&body.cron_expression).is_err() {
        return Err(HeraldError::BadClientData(format!(
            "Invalid cron expression: {}. It should have six fields, seconds first.",
            body.cron_expression
        )));
    }

    let callback = Arc::new(BroadcastJob {
        target: body.target,
        message: body.message,
    });
    if !scheduler.register(&body.name, &body.cron_expression, callback) {
        return Err(HeraldError::Conflict(format!(
            "A job named {} is already registered.",
            body.name
        )));
    }

    Ok(
        HttpResponse::Created().json(create_scheduler_job::APIResponse {
            job: ScheduledJobDTO {
                name: body.name,
                cron_expression: body.cron_expression,
            },
        }),
    )
}

async fn cancel_job_controller(
    path_params: web::Path<cancel_scheduler_job::PathParams>,
    scheduler: web::Data<SchedulerService>,
) -> Result<HttpResponse, HeraldError> {
    if !scheduler.cancel(&path_params.job_name) {
        return Err(HeraldError::NotFound(format!(
            "The job with name: {}, was not found.",
            path_params.job_name
        )));
    }
    Ok(HttpResponse::Ok().json(cancel_scheduler_job::APIResponse {
        job_name: path_params.job_name.clone(),
    }))
}

async fn restart_controller(scheduler: web::Data<SchedulerService>) -> HttpResponse {
    scheduler.restart_all();
    HttpResponse::Ok().json(restart_scheduler::APIResponse {
        jobs: job_listing(&scheduler),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/scheduler/jobs", web::get().to(get_jobs_controller));
    cfg.route("/scheduler/jobs", web::post().to(create_job_controller));
    cfg.route(
        "/scheduler/jobs/{job_name}",
        web::delete().to(cancel_job_controller),
    );
    cfg.route("/scheduler/restart", web::post().to(restart_controller));
}
