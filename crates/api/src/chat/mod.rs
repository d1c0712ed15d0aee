use crate::error::HeraldError;
use actix_web::{web, HttpResponse};
use herald_api_structs::send_chat_message::*;
use herald_infra::{ChatTemplate, HeraldContext};

/// One-off chat message to a single number, used for opt-in and test sends.
/// Transport failures come back as `success: false`, never as an HTTP error.
async fn send_chat_message_controller(
    body_params: web::Json<RequestBody>,
    ctx: web::Data<HeraldContext>,
) -> Result<HttpResponse, HeraldError> {
    let body = body_params.0;
    if body.phone_number.trim().is_empty() {
        return Err(HeraldError::BadClientData(
            "phoneNumber cannot be empty.".into(),
        ));
    }

    let result = match (body.message, body.template) {
        (Some(message), None) => {
            ctx.transports
                .chat
                .send_text(&body.phone_number, &message)
                .await
        }
        (None, Some(template)) => {
            ctx.transports
                .chat
                .send_template(
                    &body.phone_number,
                    ChatTemplate {
                        name: template.name,
                        language_code: template.language_code,
                        parameters: template.parameters,
                    },
                )
                .await
        }
        _ => {
            return Err(HeraldError::BadClientData(
                "Provide exactly one of message or template.".into(),
            ))
        }
    };

    Ok(HttpResponse::Ok().json(APIResponse {
        success: result.success,
        message_id: result.message_id,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/chat/send", web::post().to(send_chat_message_controller));
}
