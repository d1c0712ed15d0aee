use herald_domain::{Recipient, TargetAudience, ID};
use herald_infra::HeraldContext;

#[derive(Debug, PartialEq)]
pub enum ResolutionError {
    /// The audience selected nobody, there is nothing to deliver
    EmptyAudience,
    /// `Specific` audience without recipient ids
    MissingTargetIds,
    Storage,
}

/// Expands a `TargetAudience` into the concrete recipients behind it
pub async fn resolve_recipients(
    audience: &TargetAudience,
    target_ids: &[ID],
    ctx: &HeraldContext,
) -> Result<Vec<Recipient>, ResolutionError> {
    let recipients = match audience {
        TargetAudience::All => ctx.repos.participants.find_all().await,
        TargetAudience::Winners => ctx.repos.participants.find_winners().await,
        TargetAudience::Specific => {
            if target_ids.is_empty() {
                return Err(ResolutionError::MissingTargetIds);
            }
            ctx.repos.participants.find_many(target_ids).await
        }
        TargetAudience::Category { tag } => ctx.repos.participants.find_by_category(*tag).await,
    }
    .map_err(|_| ResolutionError::Storage)?;

    if recipients.is_empty() {
        return Err(ResolutionError::EmptyAudience);
    }

    Ok(recipients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_domain::Category;
    use herald_infra::setup_context;

    fn recipient(name: &str, category: Category) -> Recipient {
        Recipient {
            id: Default::default(),
            name: name.into(),
            email: format!("{}@example.com", name),
            phone: "9099325885".into(),
            category,
        }
    }

    #[actix_web::main]
    #[test]
    async fn resolves_by_category() {
        let ctx = setup_context().await;
        for (name, category) in [
            ("ada", Category::Video),
            ("grace", Category::UiUx),
            ("linus", Category::Video),
        ] {
            ctx.repos
                .participants
                .insert(&recipient(name, category))
                .await
                .unwrap();
        }

        let res = resolve_recipients(
            &TargetAudience::Category {
                tag: Category::Video,
            },
            &[],
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(res.len(), 2);

        let res = resolve_recipients(&TargetAudience::All, &[], &ctx)
            .await
            .unwrap();
        assert_eq!(res.len(), 3);
    }

    #[actix_web::main]
    #[test]
    async fn specific_without_ids_is_rejected() {
        let ctx = setup_context().await;
        let res = resolve_recipients(&TargetAudience::Specific, &[], &ctx).await;
        assert_eq!(res.unwrap_err(), ResolutionError::MissingTargetIds);
    }

    #[actix_web::main]
    #[test]
    async fn empty_audience_is_an_error() {
        let ctx = setup_context().await;
        let res = resolve_recipients(&TargetAudience::Winners, &[], &ctx).await;
        assert_eq!(res.unwrap_err(), ResolutionError::EmptyAudience);
    }
}
