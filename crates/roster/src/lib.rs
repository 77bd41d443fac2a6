//! Business logic over the participant store: register a participant (the
//! store rebalances every share inside one transaction), list the roster,
//! and clear it.

use core_types::Participant;
use database::ParticipantStore;
use std::sync::Arc;

pub mod error;

pub use error::RosterError;

/// The roster service owns an injected store handle; it never reaches for a
/// global connection.
#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn ParticipantStore>,
}

impl RosterService {
    pub fn new(store: Arc<dyn ParticipantStore>) -> Self {
        Self { store }
    }

    /// Registers a participant and returns the updated roster, most recently
    /// added first. The share rebalancing happens atomically in the store.
    pub async fn add_participant(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Vec<Participant>, RosterError> {
        let created = self
            .store
            .create_with_recalculated_shares(name, email)
            .await?;
        tracing::info!(id = created.id, share = %created.share, "participant registered");

        Ok(self.store.list_all().await?)
    }

    /// The current roster, most recently added first.
    pub async fn list(&self) -> Result<Vec<Participant>, RosterError> {
        Ok(self.store.list_all().await?)
    }

    /// Removes every participant.
    pub async fn reset(&self) -> Result<(), RosterError> {
        self.store.delete_all().await?;
        tracing::info!("roster cleared");
        Ok(())
    }
}
