use super::dispatcher::{dispatch, DispatchError};
use super::resolve_recipients::ResolutionError;
use crate::error::HeraldError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use herald_api_structs::dtos::NotificationDTO;
use herald_api_structs::send_notification::*;
use herald_domain::{DispatchSummary, Notification, TargetAudience, ID};
use herald_infra::HeraldContext;

pub async fn send_notification_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    let body = body_params.0;
    let usecase = SendNotificationUseCase {
        message: body.message,
        target_audience: body.target_audience,
        target_ids: body.target_ids,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                notification: NotificationDTO::new(res.notification),
                recipient_count: res.summary.total,
                succeeded: res.summary.succeeded,
                failed: res.summary.failed,
            })
        })
        .map_err(HeraldError::from)
}

#[derive(Debug)]
pub struct SendNotificationUseCase {
    pub message: String,
    pub target_audience: TargetAudience,
    pub target_ids: Vec<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    EmptyMessage,
    MissingTargetIds,
    UnexpectedTargetIds,
    EmptyAudience,
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
                "targetIds is only allowed when the audience is specific.".into(),
            ),
            UseCaseError::EmptyAudience => Self::BadClientData(
                "The selected audience does not contain any recipients.".into(),
            ),
            UseCaseError::Storage => Self::InternalError,
        }
    }
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub notification: Notification,
    pub summary: DispatchSummary,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendNotificationUseCase {
    type Response = UseCaseRes;

    type Error = UseCaseError;

    const NAME: &'static str = "SendNotification";

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
        let mut notification = Notification::new(
            self.message.clone(),
            now,
            self.target_audience.clone(),
            self.target_ids.clone(),
            now,
        );
        ctx.repos
            .notifications
            .insert(&notification)
            .await
            .map_err(|_| UseCaseError::Storage)?;

        match dispatch(&mut notification, ctx).await {
            Ok(summary) => Ok(UseCaseRes {
                notification,
                summary,
            }),
            Err(DispatchError::Resolution(ResolutionError::MissingTargetIds)) => {
                Err(UseCaseError::MissingTargetIds)
            }
            Err(DispatchError::Resolution(ResolutionError::EmptyAudience)) => {
                Err(UseCaseError::EmptyAudience)
            }
            Err(DispatchError::Resolution(ResolutionError::Storage))
            | Err(DispatchError::Persistence) => Err(UseCaseError::Storage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_domain::{Category, NotificationStatus, Recipient};
    use herald_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn sends_immediately_to_a_specific_recipient() {
        let mut ctx = setup_context().await;
        ctx.config.send_delay_millis = 0;
        let recipient = Recipient {
            id: Default::default(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone: "9099325885".into(),
            category: Category::Video,
        };
        ctx.repos.participants.insert(&recipient).await.unwrap();

        let mut usecase = SendNotificationUseCase {
            message: "Your badge is ready".into(),
            target_audience: TargetAudience::Specific,
            target_ids: vec![recipient.id],
        };

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.summary.total, 1);
        assert_eq!(res.summary.succeeded, 1);
        assert_eq!(res.notification.status, NotificationStatus::Sent);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_specific_audience_without_target_ids_before_persisting() {
        let ctx = setup_context().await;

        let mut usecase = SendNotificationUseCase {
            message: "Your badge is ready".into(),
            target_audience: TargetAudience::Specific,
            target_ids: Vec::new(),
        };

        let err = usecase.execute(&ctx).await.unwrap_err();
        assert_eq!(err, UseCaseError::MissingTargetIds);

        let stored = ctx.repos.notifications.find_all(None).await.unwrap();
        assert!(stored.is_empty());
    }
}
