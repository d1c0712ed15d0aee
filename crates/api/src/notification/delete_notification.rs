use crate::error::HeraldError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use herald_api_structs::delete_notification::*;
use herald_domain::{Notification, ID};
use herald_infra::HeraldContext;

pub async fn delete_notification_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    let usecase = DeleteNotificationUseCase {
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(HeraldError::from)
}

#[derive(Debug)]
pub struct DeleteNotificationUseCase {
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
impl UseCase for DeleteNotificationUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteNotification";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .delete(&self.notification_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_domain::TargetAudience;
    use herald_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn deletes_an_existing_notification() {
        let ctx = setup_context().await;
        let notification = Notification::new(
            "To be deleted".into(),
            100,
            TargetAudience::All,
            Vec::new(),
            100,
        );
        ctx.repos.notifications.insert(&notification).await.unwrap();

        let mut usecase = DeleteNotificationUseCase {
            notification_id: notification.id.clone(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());
        assert!(ctx.repos.notifications.find(&notification.id).await.is_none());

        // Deleting again is a not found error
        let res = usecase.execute(&ctx).await;
        assert!(res.is_err());
    }
}
