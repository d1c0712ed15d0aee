mod notification;
mod participant;
mod shared;

pub use notification::INotificationRepo;
use notification::InMemoryNotificationRepo;
pub use participant::IParticipantRepo;
use participant::InMemoryParticipantRepo;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub notifications: Arc<dyn INotificationRepo>,
    pub participants: Arc<dyn IParticipantRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            notifications: Arc::new(InMemoryNotificationRepo::new()),
            participants: Arc::new(InMemoryParticipantRepo::new()),
        }
    }
}
