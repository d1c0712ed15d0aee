mod chat;
mod error;
mod notification;
mod scheduler;
mod shared;
mod status;
mod webhook;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use herald_infra::HeraldContext;
use scheduler::register_default_jobs;
pub use scheduler::SchedulerService;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    chat::configure_routes(cfg);
    notification::configure_routes(cfg);
    scheduler::configure_routes(cfg);
    status::configure_routes(cfg);
    webhook::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: HeraldContext) -> Result<Self, std::io::Error> {
        let scheduler = web::Data::new(SchedulerService::new(context.clone()));
        register_default_jobs(&scheduler);

        let (server, port) = Application::configure_server(context, scheduler)?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn configure_server(
        context: HeraldContext,
        scheduler: web::Data<SchedulerService>,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(scheduler.clone())
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
