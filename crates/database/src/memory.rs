//! In-memory [`ParticipantStore`] used as a test double by the service and
//! HTTP layers. It reproduces the observable semantics of the Postgres
//! store, including ids that keep counting after a reset (like `SERIAL`).

use crate::store::ParticipantStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{equal_share, Participant};
use std::sync::Mutex;
use validator::UniqueSource;

#[derive(Debug, Default)]
pub struct MemoryParticipantStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Participant>,
    last_id: i32,
}

impl MemoryParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("participant store mutex poisoned")
    }
}

#[async_trait]
impl ParticipantStore for MemoryParticipantStore {
    async fn list_all(&self) -> Result<Vec<Participant>, DbError> {
        let inner = self.lock();
        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.lock().rows.len() as i64)
    }

    async fn create_with_recalculated_shares(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Participant, DbError> {
        let mut inner = self.lock();

        let share = equal_share(inner.rows.len() as i64 + 1);
        for row in &mut inner.rows {
            row.share = share;
        }

        inner.last_id += 1;
        let participant = Participant {
            id: inner.last_id,
            name: name.to_string(),
            email: email.to_string(),
            share,
        };
        inner.rows.push(participant.clone());

        Ok(participant)
    }

    async fn delete_all(&self) -> Result<(), DbError> {
        self.lock().rows.clear();
        Ok(())
    }
}

#[async_trait]
impl UniqueSource for MemoryParticipantStore {
    async fn exists(&self, table: &str, column: &str, value: &str) -> anyhow::Result<bool> {
        let inner = self.lock();
        match (table, column) {
            ("users", "email") => Ok(inner.rows.iter().any(|r| r.email == value)),
            ("users", "name") => Ok(inner.rows.iter().any(|r| r.name == value)),
            _ => Err(DbError::UnsupportedUniqueTarget {
                table: table.to_string(),
                column: column.to_string(),
            }
            .into()),
        }
    }
}
