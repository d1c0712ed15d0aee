use crate::error::HeraldError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use herald_api_structs::get_notification::*;
use herald_domain::{Notification, ID};
use herald_infra::HeraldContext;

pub async fn get_notification_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    let usecase = GetNotificationUseCase {
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(HeraldError::from)
}

#[derive(Debug)]
pub struct GetNotificationUseCase {
    pub notification_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for HeraldError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(notification_id) => Self::NotFound(format!(
                "The notification with id: {}, was not found.",
                notification_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotification";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .find(&self.notification_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))
    }
}
