use crate::error::HeraldError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use herald_api_structs::create_notification::*;
use herald_domain::{Notification, TargetAudience, ID};
use herald_infra::HeraldContext;

pub async fn create_notification_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    let body = body_params.0;
    let usecase = CreateNotificationUseCase {
        message: body.message,
        scheduled_time: body.scheduled_time,
        target_audience: body.target_audience,
        target_ids: body.target_ids,
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Created().json(APIResponse::new(notification)))
        .map_err(HeraldError::from)
}

#[derive(Debug)]
pub struct CreateNotificationUseCase {
    pub message: String,
    pub scheduled_time: Option<i64>,
    pub target_audience: TargetAudience,
    pub target_ids: Vec<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyMessage,
    MissingTargetIds,
    UnexpectedTargetIds,
    Storage,
}

impl From<UseCaseError> for HeraldError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::EmptyMessage => {
                Self::BadClientData("The message cannot be empty.".into())
            }
            UseCaseError::MissingTargetIds => Self::BadClientData(
                "A specific audience requires at least one recipient id in targetIds.".into(),
            ),
            UseCaseError::UnexpectedTargetIds => Self::BadClientData(
                "targetIds can only be provided for a specific audience.".into(),
            ),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateNotificationUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateNotification";

    async fn execute(&mut self, ctx: &HeraldContext) -> Result<Self::Response, Self::Error> {
        if self.message.trim().is_empty() {
            return Err(UseCaseError::EmptyMessage);
        }
        match self.target_audience {
            TargetAudience::Specific => {
                if self.target_ids.is_empty() {
                    return Err(UseCaseError::MissingTargetIds);
                }
            }
            _ => {
                if !self.target_ids.is_empty() {
                    return Err(UseCaseError::UnexpectedTargetIds);
                }
            }
        }

        let now = ctx.sys.get_timestamp_millis();
        let notification = Notification::new(
            self.message.clone(),
            self.scheduled_time.unwrap_or(now),
            self.target_audience.clone(),
            self.target_ids.clone(),
            now,
        );

        match ctx.repos.notifications.insert(&notification).await {
            Ok(_) => Ok(notification),
            Err(_) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_domain::NotificationStatus;
    use herald_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn creates_a_pending_notification() {
        let ctx = setup_context().await;
        let mut usecase = CreateNotificationUseCase {
            message: "Results are out".into(),
            scheduled_time: Some(1_700_000_000_000),
            target_audience: TargetAudience::Winners,
            target_ids: Vec::new(),
        };

        let notification = usecase.execute(&ctx).await.unwrap();
        assert_eq!(notification.status, NotificationStatus::Pending);
        assert_eq!(notification.scheduled_time, 1_700_000_000_000);

        let stored = ctx.repos.notifications.find(&notification.id).await;
        assert!(stored.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_specific_audience_without_ids_and_persists_nothing() {
        let ctx = setup_context().await;
        let mut usecase = CreateNotificationUseCase {
            message: "Hi".into(),
            scheduled_time: None,
            target_audience: TargetAudience::Specific,
            target_ids: Vec::new(),
        };

        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::MissingTargetIds);

        let all = ctx.repos.notifications.find_all(None).await.unwrap();
        assert!(all.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn rejects_target_ids_for_broad_audiences() {
        let ctx = setup_context().await;
        let mut usecase = CreateNotificationUseCase {
            message: "Hi".into(),
            scheduled_time: None,
            target_audience: TargetAudience::All,
            target_ids: vec![Default::default()],
        };

        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::UnexpectedTargetIds);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_an_empty_message() {
        let ctx = setup_context().await;
        let mut usecase = CreateNotificationUseCase {
            message: "   ".into(),
            scheduled_time: None,
            target_audience: TargetAudience::All,
            target_ids: Vec::new(),
        };

        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::EmptyMessage);
    }
}
