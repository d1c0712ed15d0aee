use herald_api::Application;
use herald_infra::{setup_context, Config, HeraldContext};

pub struct TestApp {
    pub config: Config,
    pub ctx: HeraldContext,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, String) {
    let mut ctx = setup_context().await;
    ctx.config.port = 0; // Random port
    ctx.config.send_delay_millis = 0;

    let config = ctx.config.clone();
    let app_ctx = ctx.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        ctx: app_ctx,
    };
    (app, address)
}
