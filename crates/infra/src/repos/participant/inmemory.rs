use super::IParticipantRepo;
use crate::repos::shared::inmemory_repo::*;
use herald_domain::{Category, Entity, Recipient, ID};

pub struct InMemoryParticipantRepo {
    participants: std::sync::Mutex<Vec<Recipient>>,
    winners: std::sync::Mutex<Vec<ID>>,
}

impl InMemoryParticipantRepo {
    pub fn new() -> Self {
        Self {
            participants: std::sync::Mutex::new(Vec::new()),
            winners: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IParticipantRepo for InMemoryParticipantRepo {
    async fn insert(&self, recipient: &Recipient) -> anyhow::Result<()> {
        insert(recipient, &self.participants);
        Ok(())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Recipient>> {
        Ok(find_by(&self.participants, |_| true))
    }

    async fn find_many(&self, recipient_ids: &[ID]) -> anyhow::Result<Vec<Recipient>> {
        Ok(find_by(&self.participants, |r| {
            recipient_ids.contains(r.id())
        }))
    }

    async fn find_by_category(&self, category: Category) -> anyhow::Result<Vec<Recipient>> {
        Ok(find_by(&self.participants, |r| r.category == category))
    }

    async fn add_winner(&self, recipient_id: &ID) -> anyhow::Result<()> {
        let mut winners = self.winners.lock().unwrap();
        winners.push(recipient_id.clone());
        Ok(())
    }

    async fn find_winners(&self) -> anyhow::Result<Vec<Recipient>> {
        let winner_ids = self.winners.lock().unwrap().clone();
        // Dangling winner rows are dropped here
        Ok(find_by(&self.participants, |r| winner_ids.contains(r.id())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(name: &str, category: Category) -> Recipient {
        Recipient {
            id: Default::default(),
            name: name.into(),
            email: format!("{}@example.com", name),
            phone: "9099325885".into(),
            category,
        }
    }

    #[tokio::test]
    async fn filters_by_category() {
        let repo = InMemoryParticipantRepo::new();
        repo.insert(&recipient("ada", Category::Video)).await.unwrap();
        repo.insert(&recipient("joan", Category::Graphics))
            .await
            .unwrap();

        let found = repo.find_by_category(Category::Video).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "ada");
    }

    #[tokio::test]
    async fn winners_with_missing_participants_are_dropped() {
        let repo = InMemoryParticipantRepo::new();
        let winner = recipient("ada", Category::Video);
        repo.insert(&winner).await.unwrap();
        repo.add_winner(&winner.id).await.unwrap();
        // A winner row referencing a participant that was deleted
        repo.add_winner(&ID::new()).await.unwrap();

        let winners = repo.find_winners().await.unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].id, winner.id);
    }
}
