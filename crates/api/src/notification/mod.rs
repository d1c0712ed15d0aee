mod create_notification;
mod delete_notification;
pub mod dispatcher;
mod get_notification;
mod get_notifications;
pub mod process_pending;
pub mod resolve_recipients;
mod send_notification;
mod transport_status;
mod update_notification;

use actix_web::web;
use create_notification::create_notification_controller;
use delete_notification::delete_notification_controller;
use get_notification::get_notification_controller;
use get_notifications::get_notifications_controller;
use process_pending::process_pending_controller;
use send_notification::send_notification_controller;
use transport_status::transport_status_controller;
use update_notification::update_notification_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications",
        web::post().to(create_notification_controller),
    );
    cfg.route("/notifications", web::get().to(get_notifications_controller));

    cfg.route(
        "/notifications/send",
        web::post().to(send_notification_controller),
    );
    cfg.route(
        "/notifications/process-pending",
        web::post().to(process_pending_controller),
    );
    cfg.route(
        "/notifications/transport-status",
        web::get().to(transport_status_controller),
    );

    cfg.route(
        "/notifications/{notification_id}",
        web::get().to(get_notification_controller),
    );
    cfg.route(
        "/notifications/{notification_id}",
        web::put().to(update_notification_controller),
    );
    cfg.route(
        "/notifications/{notification_id}",
        web::delete().to(delete_notification_controller),
    );
}
