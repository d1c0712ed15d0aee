use crate::dtos::ScheduledJobDTO;
use herald_domain::JobTarget;
use serde::{Deserialize, Serialize};

pub mod create_scheduler_job {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub cron_expression: String,
        pub target: JobTarget,
        pub message: String,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub job: ScheduledJobDTO,
    }
}

pub mod get_scheduler_jobs {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub jobs: Vec<ScheduledJobDTO>,
    }
}

pub mod cancel_scheduler_job {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub job_name: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub job_name: String,
    }
}

pub mod restart_scheduler {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub jobs: Vec<ScheduledJobDTO>,
    }
}
