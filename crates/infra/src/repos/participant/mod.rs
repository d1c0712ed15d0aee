mod inmemory;

pub use inmemory::InMemoryParticipantRepo;
use herald_domain::{Category, Recipient, ID};

/// Read side of the participant store. The store itself (registration,
/// review, submissions) is owned by another part of the platform; this
/// subsystem only needs recipient projections out of it.
#[async_trait::async_trait]
pub trait IParticipantRepo: Send + Sync {
    async fn insert(&self, recipient: &Recipient) -> anyhow::Result<()>;
    async fn find_all(&self) -> anyhow::Result<Vec<Recipient>>;
    async fn find_many(&self, recipient_ids: &[ID]) -> anyhow::Result<Vec<Recipient>>;
    async fn find_by_category(&self, category: Category) -> anyhow::Result<Vec<Recipient>>;
    /// Marks a participant as a winner
    async fn add_winner(&self, recipient_id: &ID) -> anyhow::Result<()>;
    /// Joins through the winners relation. Winner rows whose participant no
    /// longer exists are dropped.
    async fn find_winners(&self) -> anyhow::Result<Vec<Recipient>>;
}
