use crate::error::HeraldError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use herald_api_structs::update_notification::*;
use herald_domain::{Notification, NotificationStatus, ID};
use herald_infra::HeraldContext;

pub async fn update_notification_controller(
    path_params: web::Path<PathParams>,
    body_params: web::Json<RequestBody>,
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    let body = body_params.0;
    let status = match &body.status {
        Some(raw) => Some(
            raw.parse::<NotificationStatus>()
                .map_err(HeraldError::BadClientData)?,
        ),
        None => None,
    };

    let usecase = UpdateNotificationUseCase {
        notification_id: path_params.notification_id.clone(),
        message: body.message,
        scheduled_time: body.scheduled_time,
        status,
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(HeraldError::from)
}

#[derive(Debug)]
pub struct UpdateNotificationUseCase {
    pub notification_id: ID,
    pub message: Option<String>,
    pub scheduled_time: Option<i64>,
    pub status: Option<NotificationStatus>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NothingToUpdate,
    EmptyMessage,
    IllegalStatusTransition(NotificationStatus, NotificationStatus),
    NotFound(ID),
    Storage,
}

impl From<UseCaseError> for HeraldError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NothingToUpdate => {
                Self::BadClientData("At least one field must be provided.".into())
            }
            UseCaseError::EmptyMessage => {
                Self::BadClientData("The message cannot be empty.".into())
            }
            UseCaseError::IllegalStatusTransition(from, to) => Self::Conflict(format!(
                "The notification status cannot move from {:?} to {:?}.",
                from, to
            )),
            UseCaseError::NotFound(notification_id) => Self::NotFound(format!(
                "The notification with id: {}, was not found.",
                notification_id
            )),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateNotificationUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateNotification";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        if self.message.is_none() && self.scheduled_time.is_none() && self.status.is_none() {
            return Err(UseCaseError::NothingToUpdate);
        }

        let mut notification = ctx
            .repos
            .notifications
            .find(&self.notification_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))?;

        if let Some(message) = &self.message {
            if message.trim().is_empty() {
                return Err(UseCaseError::EmptyMessage);
            }
            notification.message = message.clone();
        }
        if let Some(scheduled_time) = self.scheduled_time {
            notification.scheduled_time = scheduled_time;
        }
        if let Some(status) = self.status {
            let from = notification.status;
            if !notification.set_status(status) {
                return Err(UseCaseError::IllegalStatusTransition(from, status));
            }
            if status == NotificationStatus::Sent && notification.sent_at.is_none() {
                notification.sent_at = Some(ctx.sys.get_timestamp_millis());
            }
        }

        match ctx.repos.notifications.save(&notification).await {
            Ok(_) => Ok(notification),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}
