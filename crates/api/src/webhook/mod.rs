use crate::error::HeraldError;
use actix_web::{web, HttpResponse};
use herald_api_structs::{receive_webhook_event, verify_webhook};
use herald_infra::HeraldContext;
use tracing::info;

/// `object` value the chat provider sets on events for business accounts
const MESSAGING_OBJECT: &str = "whatsapp_business_account";

/// Subscription handshake: the challenge is echoed back iff the mode is
/// "subscribe" and the token matches the configured secret. Comparison is
/// case sensitive.
pub fn verify_token<'a>(
    mode: Option<&str>,
    token: Option<&str>,
    challenge: Option<&'a str>,
    expected: &str,
) -> Option<&'a str> {
    match (mode, token, challenge) {
        (Some("subscribe"), Some(token), Some(challenge)) if token == expected => Some(challenge),
        _ => None,
    }
}

async fn verify_webhook_controller(
    query_params: web::Query<verify_webhook::QueryParams>,
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    match verify_token(
        query_params.mode.as_deref(),
        query_params.verify_token.as_deref(),
        query_params.challenge.as_deref(),
        &ctx.config.webhook_verify_token,
    ) {
        Some(challenge) => {
            info!("Webhook subscription verified");
            Ok(HttpResponse::Ok().body(challenge.to_string()))
        }
        None => Err(HeraldError::Forbidden(
            "Webhook verification failed.".into(),
        )),
    }
}

// The provider retries on non-2xx, so event payloads are always answered
// with 200 even when they are not for us.
async fn receive_webhook_event_controller(
    body_params: web::Json<receive_webhook_event::RequestBody>,
) -> HttpResponse {
    let event = body_params.0;
    if event.object != MESSAGING_OBJECT {
        return HttpResponse::Ok().body("OK");
    }

    for entry in &event.entry {
        for change in &entry.changes {
            for message in &change.value.messages {
                let body = message.text.as_ref().map(|t| t.body.as_str()).unwrap_or("");
                info!(
                    "Inbound chat message {} from {}: {}",
                    message.id, message.from, body
                );
            }
            for status in &change.value.statuses {
                info!(
                    "Delivery status for message {}: {}",
                    status.id, status.status
                );
            }
        }
    }

    HttpResponse::Ok().body("OK")
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook", web::get().to(verify_webhook_controller));
    cfg.route("/webhook", web::post().to(receive_webhook_event_controller));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_the_challenge_on_a_valid_handshake() {
        assert_eq!(
            verify_token(Some("subscribe"), Some("S"), Some("xyz"), "S"),
            Some("xyz")
        );
    }

    #[test]
    fn rejects_a_wrong_token() {
        assert_eq!(
            verify_token(Some("subscribe"), Some("nope"), Some("xyz"), "S"),
            None
        );
    }

    #[test]
    fn rejects_a_wrong_mode() {
        assert_eq!(
            verify_token(Some("unsubscribe"), Some("S"), Some("xyz"), "S"),
            None
        );
    }

    #[test]
    fn token_comparison_is_case_sensitive() {
        assert_eq!(
            verify_token(Some("subscribe"), Some("s"), Some("xyz"), "S"),
            None
        );
    }

    #[test]
    fn rejects_missing_parameters() {
        assert_eq!(verify_token(None, Some("S"), Some("xyz"), "S"), None);
        assert_eq!(verify_token(Some("subscribe"), None, Some("xyz"), "S"), None);
        assert_eq!(verify_token(Some("subscribe"), Some("S"), None, "S"), None);
    }
}
