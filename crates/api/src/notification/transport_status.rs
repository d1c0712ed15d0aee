use actix_web::{web, HttpResponse};
use herald_api_structs::transport_status::*;
use herald_infra::HeraldContext;

/// Lets operators see whether real transport credentials are loaded or the
/// server is running with stubbed sends
pub async fn transport_status_controller(ctx: web::Data<HeraldContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        email_configured: ctx.transports.email.is_configured(),
        chat_configured: ctx.transports.chat.is_configured(),
    })
}
