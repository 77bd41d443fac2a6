use crate::DbError;
use async_trait::async_trait;
use core_types::{equal_share, Participant};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use validator::UniqueSource;

/// Column pairs a `unique:` rule may target. The lookup query is assembled
/// from this list, never from rule text.
const UNIQUE_TARGETS: &[(&str, &str)] = &[("users", "email"), ("users", "name")];

/// The persistence seam for the roster.
///
/// The HTTP layer and the service only see this trait, so tests substitute
/// the in-memory store without touching Postgres.
#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// All participants, most recently added first (id descending).
    async fn list_all(&self) -> Result<Vec<Participant>, DbError>;

    /// Number of registered participants.
    async fn count(&self) -> Result<i64, DbError>;

    /// Atomically rebalances every existing share to `100 / (count + 1)` and
    /// inserts the newcomer at that same share. Both writes commit together
    /// or not at all. Returns the inserted participant.
    async fn create_with_recalculated_shares(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Participant, DbError>;

    /// Removes every participant row.
    async fn delete_all(&self) -> Result<(), DbError>;
}

/// Row shape of the `users` table.
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    share: Decimal,
}

impl From<UserRow> for Participant {
    fn from(row: UserRow) -> Self {
        Participant {
            id: row.id,
            name: row.name,
            email: row.email,
            share: row.share,
        }
    }
}

/// PostgreSQL-backed [`ParticipantStore`].
#[derive(Debug, Clone)]
pub struct PgParticipantStore {
    pool: PgPool,
}

impl PgParticipantStore {
    /// Creates a new store over a shared connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantStore for PgParticipantStore {
    async fn list_all(&self) -> Result<Vec<Participant>, DbError> {
        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, name, email, share FROM users ORDER BY id DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Participant::from).collect())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create_with_recalculated_shares(
        &self,
        name: &str,
        email: &str,
    ) -> Result<Participant, DbError> {
        let mut tx = self.pool.begin().await?;

        // The count is read inside the transaction; a count taken outside
        // could race a concurrent create.
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;
        let share = equal_share(count + 1);

        sqlx::query("UPDATE users SET share = $1")
            .bind(share)
            .execute(&mut *tx)
            .await?;

        let row: UserRow = sqlx::query_as(
            "INSERT INTO users (name, email, share) VALUES ($1, $2, $3) \
             RETURNING id, name, email, share",
        )
        .bind(name)
        .bind(email)
        .bind(share)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete_all(&self) -> Result<(), DbError> {
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UniqueSource for PgParticipantStore {
    async fn exists(&self, table: &str, column: &str, value: &str) -> anyhow::Result<bool> {
        if !UNIQUE_TARGETS.contains(&(table, column)) {
            return Err(DbError::UnsupportedUniqueTarget {
                table: table.to_string(),
                column: column.to_string(),
            }
            .into());
        }

        let query = format!("SELECT COUNT(*) FROM {table} WHERE {column} = $1");
        let count: i64 = sqlx::query_scalar(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from)?;

        Ok(count > 0)
    }
}
