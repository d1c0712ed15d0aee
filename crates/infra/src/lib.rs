mod config;
mod repos;
mod services;
mod system;

pub use config::{ChatConfig, Config, EmailConfig};
pub use repos::{INotificationRepo, IParticipantRepo, Repos};
pub use services::{
    normalize_phone_number, ChatService, ChatTemplate, EmailService, TransportResult, Transports,
    STUB_MESSAGE_ID,
};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct HeraldContext {
    pub repos: Repos,
    pub config: Config,
    pub transports: Transports,
    pub sys: Arc<dyn ISys>,
}

impl HeraldContext {
    fn create(config: Config) -> Self {
        let transports = Transports::create(&config);
        Self {
            // The durable participant / notification store is an external
            // collaborator; this subsystem ships with the inmemory repos.
            repos: Repos::create_inmemory(),
            config,
            transports,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> HeraldContext {
    HeraldContext::create(Config::new())
}
