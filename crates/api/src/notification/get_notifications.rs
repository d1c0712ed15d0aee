use crate::error::HeraldError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use herald_api_structs::get_notifications::*;
use herald_domain::{Notification, NotificationStatus};
use herald_infra::HeraldContext;

pub async fn get_notifications_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    let status = match &query_params.status {
        Some(raw) => Some(
            raw.parse::<NotificationStatus>()
                .map_err(HeraldError::BadClientData)?,
        ),
        None => None,
    };

    let usecase = GetNotificationsUseCase { status };

    execute(usecase, &ctx)
        .await
        .map(|notifications| HttpResponse::Ok().json(APIResponse::new(notifications)))
        .map_err(HeraldError::from)
}

#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub status: Option<NotificationStatus>,
}

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
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<Notification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .find_all(self.status)
            .await
            .map_err(|_| UseCaseError::Storage)
    }
}
